//! SurfacePool: owns every rendering surface, one per tab.
//!
//! Creation and teardown for the same tab are serialized by a per-tab gate
//! (an async mutex). Destroy retires the gate; an `ensure` that was
//! queued on a retired gate starts over on a fresh one so it never
//! revives a removed slot. Attachment state lives behind a plain mutex and
//! is never held across an await.

mod active;
mod types;

#[cfg(test)]
mod tests;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use griffin_common::{EngineError, TabId};
use parking_lot::Mutex;

use crate::engine::{LoadState, RenderEngine};

pub use active::ActiveSet;
pub use types::{SurfaceHandle, SurfacePhase};
use types::SurfaceEntry;

/// Per-tab serialization gate. The flag is set once the gate is retired.
type Gate = Arc<tokio::sync::Mutex<bool>>;

#[derive(Default)]
pub(crate) struct PoolState {
    surfaces: HashMap<TabId, SurfaceEntry>,
    active: ActiveSet,
    destroyed: HashSet<TabId>,
}

pub struct SurfacePool<E: RenderEngine> {
    engine: Arc<E>,
    gates: Mutex<HashMap<TabId, Gate>>,
    state: Mutex<PoolState>,
}

impl<E: RenderEngine> SurfacePool<E> {
    pub fn new(engine: Arc<E>) -> Self {
        Self {
            engine,
            gates: Mutex::new(HashMap::new()),
            state: Mutex::new(PoolState::default()),
        }
    }

    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    fn gate(&self, tab: &TabId) -> Gate {
        let mut gates = self.gates.lock();
        Arc::clone(gates.entry(tab.clone()).or_default())
    }

    fn retire_gate(&self, tab: &TabId, gate: &Gate) {
        let mut gates = self.gates.lock();
        if gates.get(tab).is_some_and(|g| Arc::ptr_eq(g, gate)) {
            gates.remove(tab);
        }
    }

    fn handle(&self, tab: &TabId) -> Option<SurfaceHandle> {
        let state = self.state.lock();
        state
            .surfaces
            .get(tab)
            .map(|e| SurfaceHandle::new(tab.clone(), e.load.clone()))
    }

    /// Make sure `tab` has a surface. An existing surface is returned as is,
    /// even if `url` differs from what it was created with. Concurrent
    /// calls for one tab allocate once.
    pub async fn ensure(&self, tab: &TabId, url: &str) -> Result<SurfaceHandle, EngineError> {
        loop {
            let gate = self.gate(tab);
            let retired = gate.lock().await;
            if *retired {
                continue;
            }
            if let Some(handle) = self.handle(tab) {
                return Ok(handle);
            }

            tracing::debug!(tab_id = %tab, url, "Allocating surface");
            let load = match self.engine.create_surface(tab, url).await {
                Ok(load) => load,
                Err(e) => {
                    tracing::error!(tab_id = %tab, error = %e, "Surface allocation failed");
                    return Err(e);
                }
            };

            let handle = SurfaceHandle::new(tab.clone(), load.clone());
            {
                let mut state = self.state.lock();
                state.destroyed.remove(tab);
                state.surfaces.insert(tab.clone(), SurfaceEntry::new(load));
            }
            return Ok(handle);
        }
    }

    /// Tear down `tab`'s surface: detach, stop navigation, release, then
    /// forget. Waits for an in-flight `ensure` on the same tab. Absent tabs
    /// are a no-op.
    pub async fn destroy(&self, tab: &TabId) {
        let gate = {
            let gates = self.gates.lock();
            match gates.get(tab) {
                Some(g) => Arc::clone(g),
                None => return,
            }
        };
        let mut retired = gate.lock().await;
        if *retired {
            return;
        }

        let entry = {
            let mut state = self.state.lock();
            state.deactivate(&*self.engine, tab);
            let entry = state.surfaces.remove(tab);
            if entry.is_some() {
                state.destroyed.insert(tab.clone());
            }
            entry
        };

        if let Some(entry) = entry {
            if entry.is_loading() {
                self.engine.stop_loading(tab);
            }
            self.engine.release(tab).await;
            tracing::debug!(tab_id = %tab, "Surface destroyed");
        }

        *retired = true;
        drop(retired);
        self.retire_gate(tab, &gate);
    }

    /// Destroy every surface.
    pub async fn shutdown(&self) {
        let tabs: Vec<TabId> = self.gates.lock().keys().cloned().collect();
        tracing::info!(count = tabs.len(), "Draining surface pool");
        for tab in tabs {
            self.destroy(&tab).await;
        }
        self.state.lock().active = ActiveSet::default();
    }

    pub fn contains(&self, tab: &TabId) -> bool {
        self.state.lock().surfaces.contains_key(tab)
    }

    pub fn len(&self) -> usize {
        self.state.lock().surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tabs(&self) -> Vec<TabId> {
        self.state.lock().surfaces.keys().cloned().collect()
    }

    pub fn load_state(&self, tab: &TabId) -> Option<LoadState> {
        self.state.lock().surfaces.get(tab).map(|e| *e.load.borrow())
    }

    /// Whether the tab's surface exists and finished loading.
    pub fn is_loaded(&self, tab: &TabId) -> bool {
        self.load_state(tab) == Some(LoadState::Loaded)
    }

    pub fn phase(&self, tab: &TabId) -> SurfacePhase {
        let state = self.state.lock();
        match state.surfaces.get(tab) {
            Some(entry) => entry.phase,
            None if state.destroyed.contains(tab) => SurfacePhase::Destroyed,
            None => SurfacePhase::Inactive,
        }
    }
}
