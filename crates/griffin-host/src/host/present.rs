//! Deriving the visible surfaces from registry state, and geometry.

use std::time::Instant;

use chrono::{DateTime, Utc};
use griffin_common::{EngineError, Event, PixelRect, Rect, TabId};
use griffin_tabs::GridMode;
use griffin_webview::{ActiveSet, RenderEngine};

use super::TabHost;
use crate::compositor::Pane;

/// What should be on screen right now.
enum View {
    /// Nothing attached: no tab, a structural tab, or a modal is open.
    Hidden,
    Single { tab: TabId, url: String },
    Grid(Vec<Pane>),
}

impl<E: RenderEngine> TabHost<E> {
    fn region_rect(&self) -> Rect {
        self.region.map(Rect::from).unwrap_or_default()
    }

    fn desired_view(&self) -> View {
        if self.overlay_open {
            return View::Hidden;
        }
        let region = self.region_rect();

        if self.registry.multi_view_open() {
            let views = self.registry.resolve_slots(self.registry.multi_view_slots());
            return View::Grid(self.compositor.layout_slots(views, region));
        }

        let Some(record) = self.registry.active() else {
            return View::Hidden;
        };
        if record.owns_surface() {
            return View::Single {
                tab: record.id.clone(),
                url: record.url.clone(),
            };
        }
        match record.grid() {
            Some(layout) => match layout.mode {
                GridMode::Slots => {
                    let views = self.registry.resolve_slots(&layout.slots);
                    View::Grid(self.compositor.layout_slots(views, region))
                }
                GridMode::Mosaic => View::Grid(self.compositor.layout_mosaic(
                    layout.mosaic.as_ref(),
                    |tab| self.registry.resolve_binding(Some(tab)),
                    region,
                )),
            },
            None => View::Hidden,
        }
    }

    /// Drive the pool to match the registry. Surfaces that should be shown
    /// are created on demand; only allocation failures escape.
    pub async fn present(&mut self) -> Result<(), EngineError> {
        self.flush_bounds_on_view_change();
        match self.desired_view() {
            View::Hidden => {
                self.leave_grid();
                self.pool.set_active(None);
            }
            View::Single { tab, url } => {
                self.leave_grid();
                self.show_single(&tab, &url).await?;
            }
            View::Grid(panes) => {
                if !self.in_grid {
                    self.pool.set_active(None);
                    self.in_grid = true;
                }
                let registry = &self.registry;
                self.compositor
                    .apply(&self.pool, panes, |tab| {
                        registry.get(tab).map(|record| record.url.clone())
                    })
                    .await?;
            }
        }
        Ok(())
    }

    /// A change of what is shown skips the debounce: pending geometry is
    /// dispatched before any surface or pane is laid out.
    fn flush_bounds_on_view_change(&mut self) {
        let identity = (
            self.registry.active_id().cloned(),
            self.registry.multi_view_open(),
            self.overlay_open,
        );
        if self.presented.as_ref() == Some(&identity) {
            return;
        }
        if let Some(px) = self.bounds.active_changed(identity.0.as_ref(), None) {
            self.region = Some(px);
        }
        self.presented = Some(identity);
    }

    fn leave_grid(&mut self) {
        if self.in_grid {
            self.compositor.reset();
            self.in_grid = false;
        }
    }

    async fn show_single(&mut self, tab: &TabId, url: &str) -> Result<(), EngineError> {
        self.pool.ensure(tab, url).await?;

        let already = self.pool.active_set() == ActiveSet::Single(Some(tab.clone()));
        if !already {
            if let Some(px) = self.region {
                self.pool.set_bounds(tab, px);
            }
            self.pool.set_active(Some(tab));
        }
        Ok(())
    }

    // -- Geometry --

    /// First layout of the host region.
    pub async fn region_mounted(&mut self, rect: Rect) -> Result<(), EngineError> {
        match self.bounds.mount(rect) {
            Some(px) => self.apply_region(px).await,
            None => Ok(()),
        }
    }

    /// Raw geometry change; coalesced until `poll_bounds` fires it.
    pub fn region_changed(&mut self, rect: Rect, now: Instant) {
        self.bounds.observe(rect, now);
    }

    pub async fn poll_bounds(&mut self, now: Instant) -> Result<(), EngineError> {
        match self.bounds.poll(now) {
            Some(px) => self.apply_region(px).await,
            None => Ok(()),
        }
    }

    pub fn next_bounds_deadline(&self) -> Option<Instant> {
        self.bounds.next_deadline()
    }

    async fn apply_region(&mut self, px: PixelRect) -> Result<(), EngineError> {
        tracing::debug!(?px, "Host region settled");
        self.region = Some(px);
        if self.in_grid {
            return self.present().await;
        }
        if let ActiveSet::Single(Some(tab)) = self.pool.active_set() {
            self.pool.set_bounds(&tab, px);
        }
        Ok(())
    }

    // -- Reclamation --

    /// Tabs that must keep their surfaces: the active tab and anything
    /// attached in a grid pane.
    fn protected_tabs(&self) -> Vec<TabId> {
        let mut protected = self.pool.active_set().members();
        protected.extend(self.compositor.shown_tabs());
        if let Some(active) = self.registry.active_id() {
            protected.push(active.clone());
        }
        protected
    }

    /// One reclaimer pass. Records stay; only surfaces go.
    pub async fn sweep(&mut self, now: DateTime<Utc>) -> Vec<TabId> {
        let protected = self.protected_tabs();
        let hibernated = self
            .reclaimer
            .sweep(self.registry.list_active(), &protected, &self.pool, now)
            .await;
        for tab in &hibernated {
            self.events.publish(Event::SurfaceHibernated(tab.clone()));
        }
        hibernated
    }
}
