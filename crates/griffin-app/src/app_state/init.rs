//! Window creation, webview setup, and starting the host task.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::broadcast;
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window, WindowAttributes};

use griffin_common::{Event, EventBus, PixelRect, TabColor, TabId};
use griffin_config::schema::StartupMode;
use griffin_config::{GriffinConfig, ReloadManager};
use griffin_host::{HostService, HostStores, TabHost, UpdateSink};
use griffin_webview::wry_engine::Waker;
use griffin_webview::{ContentProvider, SurfacePool, WebViewConfig, WryEngine, WryHost};

use super::core::GriffinApp;
use super::types::UserEvent;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Directory next to the binary holding the shell assets.
const SHELL_DIR: &str = "shell";

/// Fallback shell page compiled into the binary.
const EMBEDDED_SHELL: &str = include_str!("../../assets/shell/index.html");

// =============================================================================
// INITIALIZATION
// =============================================================================

impl GriffinApp {
    /// Create the window, the shell webview, and the host task.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let window = match event_loop.create_window(self.window_attributes()) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("griffin-host")
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!("Failed to start tokio runtime: {e}");
                return false;
            }
        };

        let proxy = self.proxy.clone();
        let waker: Waker = Arc::new(move || {
            let _ = proxy.send_event(UserEvent::EngineWake);
        });
        let (engine, requests) = WryEngine::channel(waker);

        let mut wry = WryHost::new(requests, webview_config(&self.config));
        if let Err(e) = wry.create_shell(
            &*window,
            &self.config.shell.url,
            window_bounds(&window),
            self.content_provider(),
        ) {
            tracing::error!("Failed to create shell webview: {e}");
            return false;
        }

        let config_file = self.config_file();
        let events = Arc::new(EventBus::default());
        runtime.spawn(log_host_events(events.subscribe()));
        let mut host = build_host(engine, events, &self.config, self.ephemeral);
        if let Some(path) = config_file.clone() {
            host = host.with_config_file(path);
        }
        let proxy = self.proxy.clone();
        let sink: UpdateSink = Arc::new(move |update| {
            let _ = proxy.send_event(UserEvent::Host(update));
        });
        let (service, handle) = HostService::new(host, sink);
        runtime.spawn(service.run());

        if let Some(path) = config_file {
            self.start_config_reload(&runtime, path);
        }

        self.window = Some(window);
        self.wry = Some(wry);
        self.host = Some(handle);
        self.tokio_runtime = Some(runtime);
        tracing::info!("Window created and host started");
        true
    }

    fn window_attributes(&self) -> WindowAttributes {
        let config = &self.config.window;
        let attrs = WindowAttributes::default()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(
                f64::from(config.width),
                f64::from(config.height),
            ));
        match config.startup_mode {
            StartupMode::Windowed => attrs,
            StartupMode::Maximized => attrs.with_maximized(true),
            StartupMode::Fullscreen => attrs.with_fullscreen(Some(Fullscreen::Borderless(None))),
        }
    }

    /// Serve `griffin://` from the assets directory, with the embedded
    /// page as the fallback entry point.
    fn content_provider(&self) -> ContentProvider {
        let assets_dir = self
            .config
            .shell
            .assets_dir
            .as_ref()
            .map(PathBuf::from)
            .or_else(default_assets_dir);

        let assets_dir = match assets_dir {
            Some(dir) if dir.is_dir() => Some(dir),
            Some(dir) => {
                tracing::warn!(
                    path = %dir.display(),
                    "Shell assets directory not found, using the embedded shell"
                );
                None
            }
            None => None,
        };

        let has_index = assets_dir
            .as_ref()
            .is_some_and(|dir| dir.join("index.html").is_file());
        let mut provider = ContentProvider::new(assets_dir);
        if !has_index {
            provider.add_override("index.html", "text/html", EMBEDDED_SHELL);
        }
        provider
    }

    /// The `--config` path, else the platform default.
    fn config_file(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config_path {
            return Some(path.clone());
        }
        match griffin_config::toml_loader::default_config_path() {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("No config file location, settings will not be saved: {e}");
                None
            }
        }
    }

    /// Forward validated config edits to the UI thread.
    fn start_config_reload(&self, runtime: &tokio::runtime::Runtime, path: PathBuf) {
        let proxy = self.proxy.clone();
        runtime.spawn(async move {
            let (_, mut updates) = ReloadManager::start(path);
            while updates.changed().await.is_ok() {
                let config = updates.borrow_and_update().clone();
                if proxy
                    .send_event(UserEvent::ConfigReloaded(Box::new(config)))
                    .is_err()
                {
                    break;
                }
            }
        });
    }
}

fn default_assets_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(SHELL_DIR))
}

/// Engine settings derived from the config file.
pub(super) fn webview_config(config: &GriffinConfig) -> WebViewConfig {
    WebViewConfig {
        devtools: config.surfaces.devtools,
        user_agent: config.surfaces.user_agent.clone(),
        background: TabColor::parse(&config.window.background).map(|c| c.rgb()),
        ..WebViewConfig::default()
    }
}

/// The whole client area, in logical pixels.
pub(super) fn window_bounds(window: &Window) -> PixelRect {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    PixelRect::new(0, 0, size.width.round() as i32, size.height.round() as i32)
}

/// A tab host over the wry engine, restored from disk unless `ephemeral`.
/// Unreadable state starts an empty session that does not save, so the
/// files on disk are left for inspection.
fn build_host(
    engine: WryEngine,
    events: Arc<EventBus>,
    config: &GriffinConfig,
    ephemeral: bool,
) -> TabHost<WryEngine> {
    let pool = Arc::new(SurfacePool::new(Arc::new(engine)));
    let host = TabHost::from_config(Arc::clone(&pool), Arc::clone(&events), config);
    if ephemeral {
        tracing::info!("Ephemeral session, tabs will not be saved");
        return host;
    }

    let stores = match HostStores::in_data_dir() {
        Ok(stores) => stores,
        Err(e) => {
            tracing::warn!("Tab storage unavailable, tabs will not be saved: {e}");
            return host;
        }
    };
    match host.with_stores(stores) {
        Ok(host) => host,
        Err(e) => {
            tracing::error!("Failed to restore tabs, starting empty: {e}");
            TabHost::from_config(pool, events, config)
        }
    }
}

/// Log tab lifecycle notifications until the host's bus goes away.
/// Returns how many were seen.
async fn log_host_events(mut events: broadcast::Receiver<Event>) -> usize {
    let mut seen = 0;
    loop {
        match events.recv().await {
            Ok(Event::TabActivated(tab)) => {
                tracing::info!(tab_id = ?tab.as_ref().map(TabId::as_str), "Active tab changed");
            }
            Ok(Event::SurfaceHibernated(tab)) => {
                tracing::info!(tab_id = %tab, "Idle surface released");
            }
            Ok(event) => tracing::debug!(?event, "Host event"),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                tracing::debug!(missed, "Host event log fell behind");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => return seen,
        }
        seen += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webview_config_follows_surface_settings() {
        let mut config = GriffinConfig::default();
        config.surfaces.user_agent = Some("Griffin/0.1".into());
        config.surfaces.devtools = true;
        let wv = webview_config(&config);
        assert!(wv.devtools);
        assert_eq!(wv.user_agent.as_deref(), Some("Griffin/0.1"));
        assert_eq!(wv.background, Some((0x1c, 0x1c, 0x1c)));
    }

    #[test]
    fn invalid_background_is_dropped() {
        let mut config = GriffinConfig::default();
        config.window.background = "charcoal".into();
        assert_eq!(webview_config(&config).background, None);
    }

    #[tokio::test]
    async fn host_events_are_consumed_until_the_bus_closes() {
        let bus = EventBus::default();
        let logger = tokio::spawn(log_host_events(bus.subscribe()));
        bus.publish(Event::TabActivated(Some(TabId::from("a"))));
        bus.publish(Event::SurfaceHibernated(TabId::from("b")));
        bus.publish(Event::Shutdown);
        drop(bus);
        assert_eq!(logger.await.unwrap(), 3);
    }

    #[test]
    fn embedded_shell_speaks_the_ipc_protocol() {
        assert!(EMBEDDED_SHELL.contains("griffin.ipc.send('ready')"));
        assert!(EMBEDDED_SHELL.contains("region-mounted"));
        assert!(EMBEDDED_SHELL.contains("region-changed"));
    }
}
