//! Draining webview callbacks and scheduling the next wake-up.

use std::time::Instant;

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use griffin_webview::SurfaceEvent;

use super::chrome::open_external;
use super::core::GriffinApp;
use super::types::POLL_INTERVAL;

impl GriffinApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_webview_events();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    fn poll_webview_events(&mut self) {
        let events = match &self.wry {
            Some(wry) => wry.drain_events(),
            None => return,
        };

        for event in events {
            match event {
                SurfaceEvent::IpcMessage { body } => self.handle_shell_message(&body),
                SurfaceEvent::NewWindowRequested { tab, url } => {
                    tracing::debug!(tab_id = ?tab.as_ref().map(|t| t.as_str()), url = %url, "New window redirected to browser");
                    open_external(&url);
                }
                SurfaceEvent::PageLoad { tab, state, url } => {
                    tracing::trace!(tab_id = ?tab.as_ref().map(|t| t.as_str()), ?state, url = %url, "Page load");
                }
                SurfaceEvent::TitleChanged { tab, title } => {
                    tracing::trace!(tab_id = %tab, title = %title, "Page title changed");
                }
                SurfaceEvent::Closed { tab } => {
                    tracing::trace!(tab_id = %tab, "Surface closed");
                }
            }
        }
    }
}
