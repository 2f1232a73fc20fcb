//! Host window configuration types.

use serde::{Deserialize, Serialize};

/// Window startup mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StartupMode {
    #[default]
    Windowed,
    Maximized,
    Fullscreen,
}

/// Host window appearance and initial geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial inner width in logical pixels.
    pub width: u32,
    /// Initial inner height in logical pixels.
    pub height: u32,
    /// Background shown before the shell has painted.
    pub background: String,
    pub startup_mode: StartupMode,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Griffin Tab Manager".into(),
            width: 900,
            height: 670,
            background: "#1c1c1c".into(),
            startup_mode: StartupMode::Windowed,
        }
    }
}
