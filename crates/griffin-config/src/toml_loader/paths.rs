//! Where the config file lives, and first-run creation.

use std::path::{Path, PathBuf};

use griffin_common::ConfigError;

use super::template::default_config_toml;
use crate::toml_writer::write_atomic;

const APP_DIR: &str = "griffin";
const CONFIG_FILE: &str = "config.toml";

/// `<platform config dir>/griffin/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

/// Write the commented template. An existing file is never touched.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }
    write_atomic(path, &default_config_toml())?;
    tracing::info!(path = %path.display(), "Wrote default config");
    Ok(())
}
