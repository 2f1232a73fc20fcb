//! IPC between Rust and the shell webview.
//!
//! - **JS -> Rust**: `window.griffin.ipc.send(kind, payload)` posts
//!   `{kind, payload}` JSON through `window.ipc.postMessage`, received by the
//!   IPC handler on the shell webview.
//! - **Rust -> JS**: `evaluate_script` with the snippet from
//!   [`js_dispatch_message`], which calls the handler registered with
//!   `window.griffin.ipc.on(kind, fn)`.

use serde::{Deserialize, Serialize};

/// A message pushed from Rust to the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcMessage {
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl IpcMessage {
    pub fn new(kind: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// Script that delivers this message to the shell.
    pub fn to_script(&self) -> String {
        js_dispatch_message(&self.kind, &self.payload)
    }
}

/// Injected into the shell webview before any page script runs.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    window.griffin = window.griffin || {};
    window.griffin.ipc = {
        send: function(kind, payload) {
            var message = { kind: kind };
            if (payload !== undefined) {
                message.payload = payload;
            }
            window.ipc.postMessage(JSON.stringify(message));
        },
        _handlers: {},
        on: function(kind, callback) {
            this._handlers[kind] = callback;
        },
        _dispatch: function(kind, payload) {
            var handler = this._handlers[kind];
            if (handler) {
                handler(payload);
            }
        }
    };
})();
"#;

/// JS snippet that dispatches a message to the shell's IPC handler.
pub fn js_dispatch_message(kind: &str, payload: &serde_json::Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.griffin.ipc._dispatch({}, {});",
        serde_json::to_string(kind).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}
