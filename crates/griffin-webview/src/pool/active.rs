//! Attachment: the active set and everything that changes visibility or
//! geometry. All of it is synchronous; only allocation and teardown await.

use std::collections::BTreeMap;

use griffin_common::{PixelRect, TabId};

use super::types::SurfacePhase;
use super::{PoolState, SurfacePool};
use crate::engine::RenderEngine;

/// Tabs that are required to be attached. A surface is attached iff its
/// tab is a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveSet {
    Single(Option<TabId>),
    /// Slot index → tab.
    Grid(BTreeMap<usize, TabId>),
}

impl Default for ActiveSet {
    fn default() -> Self {
        ActiveSet::Single(None)
    }
}

impl ActiveSet {
    pub fn contains(&self, tab: &TabId) -> bool {
        match self {
            ActiveSet::Single(active) => active.as_ref() == Some(tab),
            ActiveSet::Grid(slots) => slots.values().any(|t| t == tab),
        }
    }

    pub fn members(&self) -> Vec<TabId> {
        match self {
            ActiveSet::Single(active) => active.iter().cloned().collect(),
            ActiveSet::Grid(slots) => slots.values().cloned().collect(),
        }
    }

    fn remove(&mut self, tab: &TabId) -> bool {
        match self {
            ActiveSet::Single(active) if active.as_ref() == Some(tab) => {
                *active = None;
                true
            }
            ActiveSet::Single(_) => false,
            ActiveSet::Grid(slots) => {
                let before = slots.len();
                slots.retain(|_, t| t != tab);
                slots.len() != before
            }
        }
    }
}

impl PoolState {
    /// Attach `tab` with its last-known bounds. Returns false when there is
    /// no surface to attach.
    pub(super) fn attach<E: RenderEngine>(&mut self, engine: &E, tab: &TabId) -> bool {
        let Some(entry) = self.surfaces.get_mut(tab) else {
            tracing::debug!(tab_id = %tab, "attach: no surface, ignoring");
            return false;
        };
        if !entry.attached {
            engine.attach(tab, entry.bounds);
            entry.attached = true;
            entry.phase = SurfacePhase::Active;
        }
        true
    }

    pub(super) fn detach<E: RenderEngine>(&mut self, engine: &E, tab: &TabId) {
        if let Some(entry) = self.surfaces.get_mut(tab) {
            if entry.attached {
                engine.detach(tab);
                entry.attached = false;
                entry.phase = SurfacePhase::Hidden;
            }
        }
    }

    pub(super) fn detach_all<E: RenderEngine>(&mut self, engine: &E) {
        for tab in self.active.members() {
            self.detach(engine, &tab);
        }
    }

    /// Drop `tab` from the active set, detaching it.
    pub(super) fn deactivate<E: RenderEngine>(&mut self, engine: &E, tab: &TabId) {
        self.active.remove(tab);
        self.detach(engine, tab);
    }
}

impl<E: RenderEngine> SurfacePool<E> {
    /// Single-view activation. Detaches whatever is attached and attaches
    /// `tab`. A tab without a surface leaves nothing active.
    pub fn set_active(&self, tab: Option<&TabId>) {
        let mut state = self.state.lock();
        if let (ActiveSet::Single(Some(current)), Some(tab)) = (&state.active, tab) {
            if current == tab {
                return;
            }
        }
        state.detach_all(&*self.engine);
        state.active = ActiveSet::Single(None);

        if let Some(tab) = tab {
            if state.attach(&*self.engine, tab) {
                state.active = ActiveSet::Single(Some(tab.clone()));
                tracing::debug!(tab_id = %tab, "Surface active");
            }
        }
    }

    /// Grid activation for one slot. Entering grid mode detaches the single
    /// active surface. A tab already shown in another slot moves here.
    pub fn set_slot_active(&self, slot: usize, tab: Option<&TabId>) {
        let mut state = self.state.lock();
        if let ActiveSet::Single(_) = state.active {
            state.detach_all(&*self.engine);
            state.active = ActiveSet::Grid(BTreeMap::new());
        }

        let current = match &state.active {
            ActiveSet::Grid(slots) => slots.get(&slot).cloned(),
            ActiveSet::Single(_) => None,
        };
        if current.as_ref() == tab {
            return;
        }
        if let Some(previous) = current {
            state.deactivate(&*self.engine, &previous);
        }

        let Some(tab) = tab else {
            return;
        };
        if state.active.contains(tab) {
            tracing::debug!(tab_id = %tab, slot, "Surface moves between slots");
            state.deactivate(&*self.engine, tab);
        }
        if state.attach(&*self.engine, tab) {
            if let ActiveSet::Grid(slots) = &mut state.active {
                slots.insert(slot, tab.clone());
            }
        }
    }

    /// Detach without destroying. The surface keeps its resources.
    pub fn hide(&self, tab: &TabId) {
        let mut state = self.state.lock();
        state.deactivate(&*self.engine, tab);
    }

    /// Record `rect` as the tab's geometry, applying it only if attached.
    pub fn set_bounds(&self, tab: &TabId, rect: PixelRect) {
        let mut state = self.state.lock();
        let Some(entry) = state.surfaces.get_mut(tab) else {
            tracing::debug!(tab_id = %tab, "set_bounds: no surface, ignoring");
            return;
        };
        if entry.bounds == Some(rect) {
            return;
        }
        entry.bounds = Some(rect);
        if entry.attached {
            self.engine.set_bounds(tab, rect);
        }
    }

    pub fn active_set(&self) -> ActiveSet {
        self.state.lock().active.clone()
    }

    /// Tabs whose surfaces are currently attached.
    pub fn attached(&self) -> Vec<TabId> {
        let state = self.state.lock();
        let mut tabs: Vec<TabId> = state
            .surfaces
            .iter()
            .filter(|(_, e)| e.attached)
            .map(|(t, _)| t.clone())
            .collect();
        tabs.sort();
        tabs
    }

    pub fn bounds_of(&self, tab: &TabId) -> Option<PixelRect> {
        self.state.lock().surfaces.get(tab).and_then(|e| e.bounds)
    }
}
