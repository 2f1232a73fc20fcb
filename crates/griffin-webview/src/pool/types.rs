use griffin_common::{PixelRect, TabId};
use tokio::sync::watch;

use crate::engine::LoadState;

/// Lifecycle phase of a tab's surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfacePhase {
    /// No surface has been created yet.
    Inactive,
    /// Allocated and navigating, never attached.
    Loading,
    /// Attached to the visible tree.
    Active,
    /// Allocated but detached.
    Hidden,
    /// Torn down (explicit destroy or hibernation). The next `ensure`
    /// recreates it.
    Destroyed,
}

/// Caller-side view of a surface. Cheap to clone; holds no engine
/// resources.
#[derive(Debug, Clone)]
pub struct SurfaceHandle {
    tab: TabId,
    load: watch::Receiver<LoadState>,
}

impl SurfaceHandle {
    pub(crate) fn new(tab: TabId, load: watch::Receiver<LoadState>) -> Self {
        Self { tab, load }
    }

    pub fn tab(&self) -> &TabId {
        &self.tab
    }

    pub fn load_state(&self) -> LoadState {
        *self.load.borrow()
    }

    pub fn is_loaded(&self) -> bool {
        self.load_state() == LoadState::Loaded
    }

    /// Wait for navigation to settle. A surface torn down mid-load reports
    /// `Failed`.
    pub async fn settled(&mut self) -> LoadState {
        match self.load.wait_for(|s| *s != LoadState::Loading).await {
            Ok(state) => *state,
            Err(_) => LoadState::Failed,
        }
    }
}

/// Pool-side record of a live surface.
#[derive(Debug)]
pub(crate) struct SurfaceEntry {
    pub load: watch::Receiver<LoadState>,
    pub bounds: Option<PixelRect>,
    pub attached: bool,
    pub phase: SurfacePhase,
}

impl SurfaceEntry {
    pub fn new(load: watch::Receiver<LoadState>) -> Self {
        Self {
            load,
            bounds: None,
            attached: false,
            phase: SurfacePhase::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        *self.load.borrow() == LoadState::Loading
    }
}
