//! IPC between the shell webview and the host task.
//!
//! Every message the shell posts is either a window-chrome command,
//! executed here on the UI thread, or a host command forwarded to the
//! host task. Anything else is rejected and logged.

use griffin_common::ChromeCommand;
use griffin_host::{HostCommand, HostUpdate};
use griffin_webview::IpcMessage;
use serde::Deserialize;

use super::core::GriffinApp;

/// A message posted by the shell, `{kind, payload}` on the wire.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub(super) enum ShellRequest {
    Chrome(ChromeCommand),
    Host(HostCommand),
}

impl ShellRequest {
    pub(super) fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

/// The shell-side message for a host update.
pub(super) fn shell_message(update: &HostUpdate) -> IpcMessage {
    match update {
        HostUpdate::State(state) => IpcMessage::new(
            "state",
            serde_json::to_value(state).unwrap_or(serde_json::Value::Null),
        ),
        HostUpdate::Error(message) => IpcMessage::new("error", serde_json::json!(message)),
    }
}

impl GriffinApp {
    /// Handle a single IPC message from the shell.
    pub(super) fn handle_shell_message(&mut self, body: &str) {
        let Some(request) = ShellRequest::parse(body) else {
            tracing::warn!(body_len = body.len(), "IPC message rejected");
            return;
        };

        match request {
            ShellRequest::Chrome(command) => {
                tracing::debug!(command = command.label(), "Chrome command");
                self.run_chrome_command(command);
            }
            ShellRequest::Host(command) => {
                let Some(host) = &self.host else {
                    tracing::debug!(?command, "Host not running, dropping command");
                    return;
                };
                if !host.send(command) {
                    tracing::warn!("Host task gone, command dropped");
                }
            }
        }
    }

    /// Deliver a host update to the shell.
    pub(super) fn push_to_shell(&mut self, update: HostUpdate) {
        if let HostUpdate::State(state) = &update {
            self.active_tab = state.active_tab_id.clone();
        }
        if let Some(wry) = &self.wry {
            wry.eval_in_shell(&shell_message(&update).to_script());
        }
    }
}
