//! wry backend for the surface pool.
//!
//! wry webviews are not `Send` and must live on the UI thread. `WryEngine`
//! is the thread-safe half: it turns every `RenderEngine` call into an
//! `EngineRequest` on a channel and wakes the event loop. `WryHost` is the
//! UI-thread half that owns the webviews and serves those requests.

mod handlers;
mod host;
mod types;

use std::sync::Arc;

use async_trait::async_trait;
use griffin_common::{EngineError, PixelRect, TabId};
use tokio::sync::{mpsc, oneshot, watch};

use crate::engine::{LoadState, RenderEngine};

pub use handlers::{is_shell_navigation_allowed, is_surface_url};
pub use host::WryHost;
pub use types::WebViewConfig;

/// Requests served by `WryHost` on the UI thread.
#[derive(Debug)]
pub enum EngineRequest {
    Create {
        tab: TabId,
        url: String,
        load: watch::Sender<LoadState>,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },
    Attach {
        tab: TabId,
        bounds: Option<PixelRect>,
    },
    Detach {
        tab: TabId,
    },
    SetBounds {
        tab: TabId,
        bounds: PixelRect,
    },
    Stop {
        tab: TabId,
    },
    Release {
        tab: TabId,
        reply: oneshot::Sender<()>,
    },
}

/// Wakes the UI event loop after a request is queued.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

pub struct WryEngine {
    requests: mpsc::UnboundedSender<EngineRequest>,
    waker: Waker,
}

impl WryEngine {
    /// Create the engine and the receiving end for `WryHost`.
    pub fn channel(waker: Waker) -> (Self, mpsc::UnboundedReceiver<EngineRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                requests: tx,
                waker,
            },
            rx,
        )
    }

    fn send(&self, request: EngineRequest) -> bool {
        if self.requests.send(request).is_err() {
            tracing::debug!("wry host gone, dropping engine request");
            return false;
        }
        (self.waker)();
        true
    }
}

#[async_trait]
impl RenderEngine for WryEngine {
    async fn create_surface(
        &self,
        tab: &TabId,
        url: &str,
    ) -> Result<watch::Receiver<LoadState>, EngineError> {
        let (load_tx, load_rx) = watch::channel(LoadState::Loading);
        let (reply_tx, reply_rx) = oneshot::channel();
        let sent = self.send(EngineRequest::Create {
            tab: tab.clone(),
            url: url.to_string(),
            load: load_tx,
            reply: reply_tx,
        });
        if !sent {
            return Err(EngineError::Disconnected);
        }
        reply_rx.await.map_err(|_| EngineError::Disconnected)??;
        Ok(load_rx)
    }

    fn attach(&self, tab: &TabId, bounds: Option<PixelRect>) {
        self.send(EngineRequest::Attach {
            tab: tab.clone(),
            bounds,
        });
    }

    fn detach(&self, tab: &TabId) {
        self.send(EngineRequest::Detach { tab: tab.clone() });
    }

    fn set_bounds(&self, tab: &TabId, bounds: PixelRect) {
        self.send(EngineRequest::SetBounds {
            tab: tab.clone(),
            bounds,
        });
    }

    fn stop_loading(&self, tab: &TabId) {
        self.send(EngineRequest::Stop { tab: tab.clone() });
    }

    async fn release(&self, tab: &TabId) {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.send(EngineRequest::Release {
            tab: tab.clone(),
            reply: reply_tx,
        }) {
            // An error means the host dropped the request, which frees the
            // surface as well
            let _ = reply_rx.await;
        }
    }
}

/// Convert pool geometry to a wry rect.
pub fn pixel_rect_to_wry(rect: &PixelRect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(
            rect.x as f64,
            rect.y as f64,
        )),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(
            rect.width.max(0) as f64,
            rect.height.max(0) as f64,
        )),
    }
}
