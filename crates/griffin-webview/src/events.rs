//! Events raised by wry surfaces and the shell webview.

use griffin_common::TabId;
use serde::{Deserialize, Serialize};

use crate::engine::LoadState;

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded.
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

impl From<PageLoadState> for LoadState {
    fn from(s: PageLoadState) -> Self {
        match s {
            PageLoadState::Started => LoadState::Loading,
            PageLoadState::Finished => LoadState::Loaded,
        }
    }
}

/// Events for the main loop to consume. `tab` is `None` for the shell
/// webview.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    PageLoad {
        tab: Option<TabId>,
        state: PageLoadState,
        url: String,
    },
    TitleChanged {
        tab: TabId,
        title: String,
    },
    /// A message posted by the shell's JavaScript.
    IpcMessage {
        body: String,
    },
    /// A surface asked to open a new window; it is opened in the system
    /// browser instead.
    NewWindowRequested {
        tab: Option<TabId>,
        url: String,
    },
    Closed {
        tab: TabId,
    },
}
