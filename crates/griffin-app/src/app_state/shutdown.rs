//! Graceful shutdown: stop the host, destroy webviews, stop the runtime.

use std::time::{Duration, Instant};

use super::core::GriffinApp;
use super::types::SHUTDOWN_GRACE;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl GriffinApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Order matters:
    /// 1. Stop the host task (releases surfaces, saves tabs and charts)
    /// 2. Destroy the remaining webviews, shell last
    /// 3. Shut down the tokio runtime (config watcher, stray tasks)
    pub(super) fn shutdown(&mut self) {
        if self.host.is_none() && self.wry.is_none() && self.tokio_runtime.is_none() {
            return;
        }
        tracing::info!("Initiating graceful shutdown");

        let runtime = self.tokio_runtime.take();

        // 1. The host releases surfaces through engine requests, which are
        // only served on this thread, so keep serving until it is done.
        if let (Some(handle), Some(rt)) = (self.host.take(), runtime.as_ref()) {
            let done = rt.spawn(async move { handle.shutdown().await });
            let deadline = Instant::now() + SHUTDOWN_GRACE;
            while !done.is_finished() {
                if Instant::now() >= deadline {
                    tracing::warn!("Host did not stop in time, forcing teardown");
                    break;
                }
                self.serve_engine_requests();
                std::thread::sleep(Duration::from_millis(2));
            }
        }

        // 2. Destroy all webviews
        if let Some(mut wry) = self.wry.take() {
            tracing::debug!(surfaces = wry.surface_count(), "Destroying webviews");
            wry.destroy_all();
        }
        self.active_tab = None;

        // 3. Shut down tokio runtime
        if let Some(rt) = runtime {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        tracing::info!("Graceful shutdown complete");
    }
}
