use std::io::ErrorKind;
use std::path::Path;

use griffin_common::ConfigError;

use super::paths::{create_default_config, default_config_path};
use crate::schema::GriffinConfig;
use crate::validation;

/// Parse config text. Absent keys fall back to their defaults.
///
/// Validation failures are only logged; the parsed values are returned
/// and the caller decides whether to use them.
pub fn parse_config(text: &str) -> Result<GriffinConfig, ConfigError> {
    let config: GriffinConfig =
        toml::from_str(text).map_err(|e| ConfigError::ParseError(format!("invalid TOML: {e}")))?;
    if let Err(e) = validation::validate(&config) {
        tracing::warn!(error = %e, "config has out-of-range values");
    }
    Ok(config)
}

pub fn load_from_path(path: &Path) -> Result<GriffinConfig, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "cannot read {}: {e}",
                path.display()
            )))
        }
    };
    let config = parse_config(&text)?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load the user's config file, writing the documented template first
/// when there is none yet.
pub fn load_default() -> Result<GriffinConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            tracing::info!(path = %path.display(), "no config file, writing defaults");
            create_default_config(&path)?;
            Ok(GriffinConfig::default())
        }
        other => other,
    }
}
