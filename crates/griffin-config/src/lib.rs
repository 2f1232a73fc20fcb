//! Griffin configuration system.
//!
//! TOML-based configuration with validation and live reload. All
//! sections use `serde(default)` so a partial (or empty) file works.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use griffin_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("timeout: {} min", config.surfaces.inactivity_timeout_minutes);
//! ```

pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::{GriffinConfig, CONFIG_SCHEMA_VERSION};
pub use toml_writer::save_config_to_path;
pub use watcher::ConfigWatcher;

use griffin_common::ConfigError;

/// Load config from the platform default path, creating a documented
/// default file on first run.
pub fn load_config() -> Result<GriffinConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path (the `--config` override).
pub fn load_config_from(path: &std::path::Path) -> Result<GriffinConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}
