//! Shell (tab strip) webview configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Entry point loaded into the shell webview.
    pub url: String,
    /// Directory served under `griffin://localhost/`. Defaults to the
    /// `shell` directory next to the executable.
    pub assets_dir: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            url: "griffin://localhost/index.html".into(),
            assets_dir: None,
        }
    }
}
