//! Internal types and constants for the app state module.

use std::time::Duration;

use griffin_config::GriffinConfig;
use griffin_host::HostUpdate;

/// Events delivered to the winit loop from other threads.
#[derive(Debug)]
pub enum UserEvent {
    /// The render engine queued requests for the UI thread.
    EngineWake,
    /// State or an error report for the shell.
    Host(HostUpdate),
    /// The config file changed on disk and passed validation.
    ConfigReloaded(Box<GriffinConfig>),
}

/// How often to drain webview callbacks (approx 120 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(8);

/// Upper bound on waiting for the host task to release its surfaces.
pub(super) const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);
