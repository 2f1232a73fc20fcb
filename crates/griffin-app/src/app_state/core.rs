//! GriffinApp struct definition and constructor.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use winit::event_loop::EventLoopProxy;
use winit::window::Window;

use griffin_common::TabId;
use griffin_config::GriffinConfig;
use griffin_host::HostHandle;
use griffin_webview::WryHost;

use super::types::UserEvent;

/// Top-level application state.
pub struct GriffinApp {
    pub(super) config: GriffinConfig,
    /// `--config` override; the platform default is used when `None`.
    pub(super) config_path: Option<PathBuf>,
    /// Skip tab persistence.
    pub(super) ephemeral: bool,
    pub(super) proxy: EventLoopProxy<UserEvent>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,

    // Webviews (UI-thread half of the render engine)
    pub(super) wry: Option<WryHost>,

    // Host task
    pub(super) host: Option<HostHandle>,
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,

    /// Active tab from the last state push. Chrome commands act on it.
    pub(super) active_tab: Option<TabId>,

    // Whether the app should exit
    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl GriffinApp {
    pub fn new(
        config: GriffinConfig,
        config_path: Option<PathBuf>,
        ephemeral: bool,
        proxy: EventLoopProxy<UserEvent>,
    ) -> Self {
        Self {
            config,
            config_path,
            ephemeral,
            proxy,
            window: None,
            wry: None,
            host: None,
            tokio_runtime: None,
            active_tab: None,
            should_exit: false,
            last_poll: Instant::now(),
        }
    }
}
