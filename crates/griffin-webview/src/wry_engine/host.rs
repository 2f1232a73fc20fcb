use std::collections::HashMap;
use std::sync::Arc;

use griffin_common::{EngineError, PixelRect, TabId};
use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};
use wry::raw_window_handle;
use wry::{WebView, WebViewBuilder};

use crate::content::{ContentProvider, PROTOCOL};
use crate::engine::LoadState;
use crate::events::SurfaceEvent;
use crate::ipc::IPC_INIT_SCRIPT;

use super::handlers::{self, EventSink};
use super::{is_surface_url, pixel_rect_to_wry, EngineRequest, WebViewConfig};

/// A chart webview owned by the host.
struct SurfaceView {
    webview: WebView,
    zoom: f64,
}

/// UI-thread owner of every wry webview: the shell plus one per tab.
pub struct WryHost {
    requests: mpsc::UnboundedReceiver<EngineRequest>,
    config: WebViewConfig,
    surfaces: HashMap<TabId, SurfaceView>,
    events: EventSink,
    shell: Option<WebView>,
}

impl WryHost {
    pub fn new(requests: mpsc::UnboundedReceiver<EngineRequest>, config: WebViewConfig) -> Self {
        Self {
            requests,
            config,
            surfaces: HashMap::new(),
            events: Arc::new(Mutex::new(Vec::new())),
            shell: None,
        }
    }

    /// Create the shell webview that renders the tab strip and modals.
    pub fn create_shell<W: raw_window_handle::HasWindowHandle>(
        &mut self,
        window: &W,
        url: &str,
        bounds: PixelRect,
        content: ContentProvider,
    ) -> Result<(), wry::Error> {
        let content = Arc::new(content);
        let load = Arc::new(watch::channel(LoadState::Loading).0);

        let mut builder = WebViewBuilder::new()
            .with_bounds(pixel_rect_to_wry(&bounds))
            .with_devtools(self.config.devtools)
            .with_clipboard(true)
            .with_initialization_script(IPC_INIT_SCRIPT)
            .with_background_color(self.shell_background())
            .with_custom_protocol(PROTOCOL.to_string(), move |_wv_id, request| {
                content.respond(&request.uri().to_string())
            });
        builder = handlers::attach_shell_ipc_handler(builder, Arc::clone(&self.events));
        builder = handlers::attach_shell_navigation_handler(builder);
        builder = handlers::attach_page_load_handler(builder, Arc::clone(&self.events), load, None);
        builder = handlers::attach_new_window_handler(builder, Arc::clone(&self.events), None);

        let webview = builder.with_url(url).build_as_child(window)?;
        debug!(url, "Shell webview created");
        self.shell = Some(webview);
        Ok(())
    }

    fn shell_background(&self) -> (u8, u8, u8, u8) {
        let (r, g, b) = self.config.background.unwrap_or((0, 0, 0));
        (r, g, b, 255)
    }

    pub fn shell(&self) -> Option<&WebView> {
        self.shell.as_ref()
    }

    /// Resize the shell to cover the whole window.
    pub fn resize_shell(&self, bounds: PixelRect) {
        if let Some(shell) = &self.shell {
            if let Err(e) = shell.set_bounds(pixel_rect_to_wry(&bounds)) {
                warn!(error = %e, "Failed to resize shell webview");
            }
        }
    }

    /// Send a script to the shell.
    pub fn eval_in_shell(&self, script: &str) {
        if let Some(shell) = &self.shell {
            if let Err(e) = shell.evaluate_script(script) {
                warn!(error = %e, "Failed to evaluate script in shell");
            }
        }
    }

    pub fn surface(&self, tab: &TabId) -> Option<&WebView> {
        self.surfaces.get(tab).map(|s| &s.webview)
    }

    /// Run a script in a tab's surface. Missing surfaces are ignored.
    pub fn eval_in_surface(&self, tab: &TabId, script: &str) {
        if let Some(surface) = self.surfaces.get(tab) {
            log_err(tab, surface.webview.evaluate_script(script));
        }
    }

    pub fn toggle_devtools(&self, tab: &TabId) {
        if !self.config.devtools {
            debug!(tab_id = %tab, "devtools disabled, ignoring toggle");
            return;
        }
        if let Some(surface) = self.surfaces.get(tab) {
            if surface.webview.is_devtools_open() {
                surface.webview.close_devtools();
            } else {
                surface.webview.open_devtools();
            }
        }
    }

    /// Change a surface's zoom by `steps` zoom steps; `None` resets it.
    pub fn zoom(&mut self, tab: &TabId, steps: Option<i32>) {
        let step = self.config.zoom_step;
        let Some(surface) = self.surfaces.get_mut(tab) else {
            return;
        };
        surface.zoom = match steps {
            Some(n) => (surface.zoom + step * n as f64).clamp(0.25, 5.0),
            None => 1.0,
        };
        if let Err(e) = surface.webview.zoom(surface.zoom) {
            warn!(tab_id = %tab, error = %e, "Failed to zoom surface");
        }
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Take the events raised by webview callbacks since the last call.
    pub fn drain_events(&self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Serve every queued engine request. Call from the UI thread whenever
    /// the engine wakes the loop.
    pub fn process_requests<W: raw_window_handle::HasWindowHandle>(&mut self, window: &W) {
        while let Ok(request) = self.requests.try_recv() {
            self.handle(window, request);
        }
    }

    fn handle<W: raw_window_handle::HasWindowHandle>(&mut self, window: &W, request: EngineRequest) {
        match request {
            EngineRequest::Create {
                tab,
                url,
                load,
                reply,
            } => {
                let result = self.create_surface(window, &tab, &url, load);
                let _ = reply.send(result);
            }
            EngineRequest::Attach { tab, bounds } => {
                if let Some(surface) = self.surfaces.get(&tab) {
                    if let Some(bounds) = bounds {
                        log_err(&tab, surface.webview.set_bounds(pixel_rect_to_wry(&bounds)));
                    }
                    log_err(&tab, surface.webview.set_visible(true));
                }
            }
            EngineRequest::Detach { tab } => {
                if let Some(surface) = self.surfaces.get(&tab) {
                    log_err(&tab, surface.webview.set_visible(false));
                }
            }
            EngineRequest::SetBounds { tab, bounds } => {
                if let Some(surface) = self.surfaces.get(&tab) {
                    log_err(&tab, surface.webview.set_bounds(pixel_rect_to_wry(&bounds)));
                }
            }
            EngineRequest::Stop { tab } => {
                if let Some(surface) = self.surfaces.get(&tab) {
                    log_err(&tab, surface.webview.evaluate_script("window.stop();"));
                }
            }
            EngineRequest::Release { tab, reply } => {
                if let Some(surface) = self.surfaces.remove(&tab) {
                    let _ = surface.webview.set_visible(false);
                    drop(surface);
                    debug!(tab_id = %tab, "Surface webview released");
                    self.events.lock().push(SurfaceEvent::Closed { tab });
                }
                let _ = reply.send(());
            }
        }
    }

    fn create_surface<W: raw_window_handle::HasWindowHandle>(
        &mut self,
        window: &W,
        tab: &TabId,
        url: &str,
        load: watch::Sender<LoadState>,
    ) -> Result<(), EngineError> {
        let load = Arc::new(load);
        let target = if is_surface_url(url) {
            url
        } else {
            warn!(tab_id = %tab, url, "Refusing to load non-web URL");
            load.send_replace(LoadState::Failed);
            "about:blank"
        };

        let mut builder = WebViewBuilder::new()
            .with_visible(false)
            .with_focused(false)
            .with_devtools(self.config.devtools)
            .with_clipboard(self.config.clipboard)
            .with_autoplay(self.config.autoplay);
        if let Some(ua) = &self.config.user_agent {
            builder = builder.with_user_agent(ua);
        }
        builder = handlers::attach_page_load_handler(
            builder,
            Arc::clone(&self.events),
            Arc::clone(&load),
            Some(tab.clone()),
        );
        builder = handlers::attach_title_handler(builder, Arc::clone(&self.events), tab.clone());
        builder =
            handlers::attach_new_window_handler(builder, Arc::clone(&self.events), Some(tab.clone()));

        let webview = builder
            .with_url(target)
            .build_as_child(window)
            .map_err(|e| EngineError::Allocation(e.to_string()))?;

        debug!(tab_id = %tab, url = %target, "Surface webview created");
        self.surfaces
            .insert(tab.clone(), SurfaceView { webview, zoom: 1.0 });
        Ok(())
    }

    /// Drop every webview, surfaces first. Used during shutdown.
    pub fn destroy_all(&mut self) {
        let count = self.surfaces.len();
        self.surfaces.clear();
        self.shell = None;
        debug!(count, "All webviews destroyed");
    }
}

fn log_err(tab: &TabId, result: Result<(), wry::Error>) {
    if let Err(e) = result {
        warn!(tab_id = %tab, error = %e, "wry call failed");
    }
}
