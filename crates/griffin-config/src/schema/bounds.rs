//! Bounds synchronization tuning.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    /// Trailing debounce window for geometry changes, in milliseconds.
    pub debounce_ms: u32,
    /// Rects narrower or shorter than this are treated as transient.
    pub min_visible_px: u32,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 350,
            min_visible_px: 10,
        }
    }
}

impl BoundsConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(u64::from(self.debounce_ms))
    }
}
