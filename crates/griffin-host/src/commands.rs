//! Requests the host accepts and the updates it emits.
//!
//! `HostCommand` is the wire form of a shell request: JSON
//! `{"kind": "...", "payload": {...}}`, mirroring `ChromeCommand`.

use griffin_common::{Rect, TabColor, TabId};
use griffin_tabs::GridMode;
use griffin_tiling::Direction;
use serde::{Deserialize, Serialize};

use crate::view::ShellState;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "kebab-case")]
pub enum HostCommand {
    /// The shell finished loading and wants the full state.
    Ready,

    // -- Tabs --
    SelectTab {
        tab_id: TabId,
    },
    CreateTab {
        #[serde(default)]
        title: String,
        #[serde(default)]
        url: String,
        #[serde(default = "default_true")]
        activate: bool,
    },
    CreateGrid {
        #[serde(default)]
        title: String,
    },
    OpenSettings,
    DeleteTab {
        tab_id: TabId,
    },
    RestoreTab {
        tab_id: TabId,
    },
    RenameTab {
        tab_id: TabId,
        title: String,
    },
    SetTabColor {
        tab_id: TabId,
        #[serde(default)]
        color: Option<TabColor>,
    },
    SortByColor,
    ReorderTab {
        from: usize,
        to: usize,
    },
    SetTabOrder {
        order: Vec<TabId>,
    },

    // -- Grid tabs --
    SetGridSlot {
        grid_id: TabId,
        slot: usize,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    SetGridMode {
        grid_id: TabId,
        mode: GridMode,
    },
    SplitPane {
        grid_id: TabId,
        target: TabId,
        tab_id: TabId,
        direction: Direction,
    },
    ClosePane {
        grid_id: TabId,
        tab_id: TabId,
    },
    ReplacePane {
        grid_id: TabId,
        current: TabId,
        replacement: TabId,
    },
    SwapPanes {
        grid_id: TabId,
        a: TabId,
        b: TabId,
    },
    ResizePane {
        grid_id: TabId,
        tab_id: TabId,
        delta: f64,
    },

    // -- Multi-view overlay and modals --
    ToggleMultiView,
    SetMultiViewSlot {
        slot: usize,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    SetOverlayOpen {
        open: bool,
    },

    // -- Geometry --
    RegionMounted {
        rect: Rect,
    },
    RegionChanged {
        rect: Rect,
    },

    // -- Direct surface control --
    EnsureSurface {
        tab_id: TabId,
    },
    HideSurface {
        tab_id: TabId,
    },
    DestroySurface {
        tab_id: TabId,
    },
    SetSurfaceBounds {
        tab_id: TabId,
        rect: Rect,
    },

    // -- Saved charts --
    AddChart {
        title: String,
        url: String,
    },
    UpdateChart {
        id: String,
        title: String,
        url: String,
    },
    DeleteChart {
        id: String,
    },
    ImportCharts {
        text: String,
    },
    OpenChart {
        id: String,
    },

    // -- Settings --
    SetInactivityTimeout {
        minutes: u32,
    },
}

impl HostCommand {
    /// Geometry reports arrive at layout frequency and are kept out of
    /// the info log.
    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            HostCommand::RegionMounted { .. } | HostCommand::RegionChanged { .. }
        )
    }
}

/// Pushed from the host to whoever renders the shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "payload", rename_all = "kebab-case")]
pub enum HostUpdate {
    State(Box<ShellState>),
    Error(String),
}
