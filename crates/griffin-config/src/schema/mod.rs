//! Configuration schema types for Griffin.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod bounds;
mod grid;
mod logging;
mod shell;
mod surfaces;
mod window;

pub use bounds::*;
pub use grid::*;
pub use logging::*;
pub use shell::*;
pub use surfaces::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Griffin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GriffinConfig {
    pub window: WindowConfig,
    pub surfaces: SurfaceConfig,
    pub bounds: BoundsConfig,
    pub grid: GridConfig,
    pub shell: ShellConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
