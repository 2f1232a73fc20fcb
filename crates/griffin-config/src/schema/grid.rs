//! Grid / mosaic layout configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Gap in pixels between grid panes.
    pub gap: u32,
    /// Width share of the large left pane in the three-slot split.
    pub primary_ratio: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            gap: 4,
            primary_ratio: 0.6,
        }
    }
}
