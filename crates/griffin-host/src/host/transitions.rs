//! Explicit state transitions. Each one mutates the registry, lets
//! `present` reconcile the pool, then persists.

use chrono::Utc;
use griffin_common::{EngineError, Event, PixelRect, Rect, TabColor, TabId};
use griffin_tabs::{GridLayout, GridMode, TabKind};
use griffin_tiling::{Direction, MosaicNode};
use griffin_webview::RenderEngine;

use super::TabHost;

impl<E: RenderEngine> TabHost<E> {
    // -- Selection --

    /// Make `tab` the active tab. Selecting a hibernated tab recreates its
    /// surface from the record's URL.
    pub async fn select(&mut self, tab: &TabId) -> Result<(), EngineError> {
        if !self.registry.contains(tab) {
            tracing::debug!(tab_id = %tab, "select: unknown tab, ignoring");
            return Ok(());
        }
        if self.registry.set_active(Some(tab), Utc::now()) {
            self.events.publish(Event::TabActivated(Some(tab.clone())));
            self.save_tabs();
        }
        self.present().await
    }

    pub async fn create_tab(
        &mut self,
        title: &str,
        url: &str,
        activate: bool,
    ) -> Result<TabId, EngineError> {
        self.add_tab(title, url, activate, TabKind::Normal).await
    }

    /// New grid tab, its mosaic seeded from the first two normal tabs.
    pub async fn create_grid(&mut self, title: &str) -> Result<TabId, EngineError> {
        let layout = GridLayout::with_candidates(&self.registry.surface_tab_ids());
        self.add_tab(title, "", true, TabKind::Grid(layout)).await
    }

    pub async fn open_settings(&mut self) -> Result<TabId, EngineError> {
        let before = self.registry.active_id().cloned();
        let id = self.registry.open_settings(Utc::now());
        if before.as_ref() != Some(&id) {
            self.events.publish(Event::TabActivated(Some(id.clone())));
        }
        self.present().await?;
        self.save_tabs();
        Ok(id)
    }

    /// Open a saved chart in a new, active tab. Unknown ids are a no-op.
    pub async fn open_chart(&mut self, chart_id: &str) -> Result<Option<TabId>, EngineError> {
        let Some(chart) = self.charts.get(chart_id).cloned() else {
            tracing::debug!(chart_id, "open_chart: unknown chart, ignoring");
            return Ok(None);
        };
        let id = self.create_tab(&chart.title, &chart.url, true).await?;
        Ok(Some(id))
    }

    async fn add_tab(
        &mut self,
        title: &str,
        url: &str,
        activate: bool,
        kind: TabKind,
    ) -> Result<TabId, EngineError> {
        let id = self.registry.create_tab(title, url, activate, kind, Utc::now());
        self.events.publish(Event::TabCreated(id.clone()));
        if activate {
            self.events.publish(Event::TabActivated(Some(id.clone())));
        }
        self.save_tabs();
        self.present().await?;
        Ok(id)
    }

    // -- Trash --

    /// Move a tab to the trash and release its surface. If it was active,
    /// the first remaining tab takes over.
    pub async fn delete(&mut self, tab: &TabId) -> Result<(), EngineError> {
        let was_active = self.registry.active_id() == Some(tab);
        if !self.registry.delete(tab) {
            tracing::debug!(tab_id = %tab, "delete: unknown tab, ignoring");
            return Ok(());
        }
        self.events.publish(Event::TabTrashed(tab.clone()));
        self.pool.destroy(tab).await;

        if was_active {
            let next = self.registry.active_id().cloned();
            if let Some(next) = &next {
                self.registry.touch(next, Utc::now());
            }
            self.events.publish(Event::TabActivated(next));
        }
        self.save_tabs();
        self.present().await
    }

    /// Bring a tab back from the trash as the active tab.
    pub async fn restore(&mut self, tab: &TabId) -> Result<(), EngineError> {
        if !self.registry.restore(tab, Utc::now()) {
            tracing::debug!(tab_id = %tab, "restore: not in trash, ignoring");
            return Ok(());
        }
        self.events.publish(Event::TabRestored(tab.clone()));
        self.events.publish(Event::TabActivated(Some(tab.clone())));
        self.save_tabs();
        self.present().await
    }

    // -- Metadata --

    pub fn rename(&mut self, tab: &TabId, title: &str) -> bool {
        let changed = self.registry.rename(tab, title);
        if changed {
            self.save_tabs();
        }
        changed
    }

    pub fn set_color(&mut self, tab: &TabId, color: Option<TabColor>) -> bool {
        let changed = self.registry.set_color(tab, color);
        if changed {
            self.save_tabs();
        }
        changed
    }

    pub fn sort_by_color(&mut self) {
        self.registry.sort_by_color();
        self.save_tabs();
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let changed = self.registry.reorder(from, to);
        if changed {
            self.save_tabs();
        }
        changed
    }

    pub fn set_order(&mut self, order: &[TabId]) {
        self.registry.set_order(order);
        self.save_tabs();
    }

    // -- Grid tabs --

    pub async fn set_grid_slot(
        &mut self,
        grid: &TabId,
        slot: usize,
        tab: Option<TabId>,
    ) -> Result<(), EngineError> {
        if self.registry.set_grid_slot(grid, slot, tab) {
            self.save_tabs();
            self.present().await?;
        }
        Ok(())
    }

    pub async fn set_grid_mode(&mut self, grid: &TabId, mode: GridMode) -> Result<(), EngineError> {
        if self.registry.set_grid_mode(grid, mode) {
            self.save_tabs();
            self.present().await?;
        }
        Ok(())
    }

    /// Split the pane showing `target`, putting `tab` beside it. An empty
    /// mosaic simply becomes `tab`.
    pub async fn split_pane(
        &mut self,
        grid: &TabId,
        target: &TabId,
        tab: TabId,
        direction: Direction,
    ) -> Result<(), EngineError> {
        self.edit_mosaic(grid, |mosaic| {
            if let Some(tree) = mosaic.as_mut() {
                return tree.split_at(target, tab, direction);
            }
            *mosaic = Some(MosaicNode::leaf(tab));
            true
        })
        .await
    }

    /// Remove the pane showing `tab`. Closing the last pane empties the
    /// mosaic.
    pub async fn close_pane(&mut self, grid: &TabId, tab: &TabId) -> Result<(), EngineError> {
        self.edit_mosaic(grid, |mosaic| {
            let last_pane = mosaic
                .as_ref()
                .is_some_and(|tree| tree.pane_count() == 1 && tree.contains_tab(tab));
            if last_pane {
                *mosaic = None;
                return true;
            }
            mosaic.as_mut().is_some_and(|tree| tree.remove_leaf(tab))
        })
        .await
    }

    pub async fn replace_pane(
        &mut self,
        grid: &TabId,
        current: &TabId,
        replacement: TabId,
    ) -> Result<(), EngineError> {
        self.edit_mosaic(grid, |mosaic| {
            mosaic
                .as_mut()
                .is_some_and(|tree| tree.replace_leaf(current, replacement))
        })
        .await
    }

    pub async fn swap_panes(&mut self, grid: &TabId, a: &TabId, b: &TabId) -> Result<(), EngineError> {
        self.edit_mosaic(grid, |mosaic| mosaic.as_mut().is_some_and(|tree| tree.swap_tabs(a, b)))
            .await
    }

    pub async fn resize_pane(&mut self, grid: &TabId, tab: &TabId, delta: f64) -> Result<(), EngineError> {
        self.edit_mosaic(grid, |mosaic| {
            mosaic.as_mut().is_some_and(|tree| tree.adjust_ratio(tab, delta))
        })
        .await
    }

    async fn edit_mosaic(
        &mut self,
        grid: &TabId,
        edit: impl FnOnce(&mut Option<MosaicNode>) -> bool,
    ) -> Result<(), EngineError> {
        let Some(layout) = self.registry.get(grid).and_then(|r| r.grid()) else {
            tracing::debug!(tab_id = %grid, "mosaic edit: not a grid tab, ignoring");
            return Ok(());
        };
        let mut mosaic = layout.mosaic.clone();
        if !edit(&mut mosaic) {
            return Ok(());
        }
        self.registry.set_mosaic(grid, mosaic);
        self.save_tabs();
        self.present().await
    }

    // -- Overlays --

    /// Flip the global multi-view overlay. While open it replaces the
    /// single active surface.
    pub async fn toggle_multi_view(&mut self) -> Result<bool, EngineError> {
        let open = self.registry.toggle_multi_view();
        tracing::debug!(open, "Multi-view toggled");
        self.present().await?;
        Ok(open)
    }

    pub async fn set_multi_view_slot(&mut self, slot: usize, tab: Option<TabId>) -> Result<(), EngineError> {
        if self.registry.set_multi_view_slot(slot, tab) {
            self.save_tabs();
            self.present().await?;
        }
        Ok(())
    }

    /// A shell modal opened or closed. Surfaces are drawn above the shell,
    /// so everything is detached while a modal is up.
    pub async fn set_overlay_open(&mut self, open: bool) -> Result<(), EngineError> {
        if self.overlay_open == open {
            return Ok(());
        }
        self.overlay_open = open;
        self.present().await
    }

    // -- Direct surface control --

    /// Create the tab's surface without showing it.
    pub async fn ensure_surface(&mut self, tab: &TabId) -> Result<(), EngineError> {
        match self.registry.get(tab) {
            Some(record) if record.owns_surface() => {
                let url = record.url.clone();
                self.pool.ensure(tab, &url).await?;
            }
            _ => tracing::debug!(tab_id = %tab, "ensure: no surface tab, ignoring"),
        }
        Ok(())
    }

    pub fn hide_surface(&mut self, tab: &TabId) {
        self.pool.hide(tab);
    }

    pub async fn destroy_surface(&mut self, tab: &TabId) {
        self.pool.destroy(tab).await;
    }

    pub fn set_surface_bounds(&mut self, tab: &TabId, rect: Rect) {
        let px = PixelRect::from_rect(&rect);
        if px.is_visible(1) {
            self.pool.set_bounds(tab, px);
        }
    }

    // -- Saved charts --

    pub fn add_chart(&mut self, title: &str, url: &str) -> String {
        let id = self.charts.add(title, url);
        self.save_charts();
        id
    }

    pub fn update_chart(&mut self, id: &str, title: &str, url: &str) -> bool {
        let changed = self.charts.update(id, title, url);
        if changed {
            self.save_charts();
        }
        changed
    }

    pub fn remove_chart(&mut self, id: &str) -> bool {
        let changed = self.charts.remove(id);
        if changed {
            self.save_charts();
        }
        changed
    }

    /// Bulk-add every http(s) URL found in `text`.
    pub fn import_charts(&mut self, text: &str) -> Vec<String> {
        let ids = self.charts.import(text);
        if !ids.is_empty() {
            tracing::info!(count = ids.len(), "Imported charts");
            self.save_charts();
        }
        ids
    }
}
