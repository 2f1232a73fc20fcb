//! Persisting a `GriffinConfig` as TOML.

use std::path::Path;

use griffin_common::ConfigError;

use crate::schema::GriffinConfig;

pub fn save_config_to_path(config: &GriffinConfig, path: &Path) -> Result<(), ConfigError> {
    let body = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::ParseError(format!("cannot serialize config: {e}")))?;
    write_atomic(path, &body)?;
    tracing::debug!(path = %path.display(), "Config saved");
    Ok(())
}

/// Write through a `.tmp` sibling renamed over `path`, creating parent
/// directories. Readers see either the old contents or the new ones.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let failed =
        |target: &Path, e: std::io::Error| ConfigError::WriteError(format!("{}: {e}", target.display()));

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| failed(parent, e))?;
    }
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents).map_err(|e| failed(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        failed(path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn saved_surface_policy_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = GriffinConfig::default();
        config.surfaces.inactivity_timeout_minutes = 30;
        config.surfaces.user_agent = Some("Griffin/0.1".into());
        save_config_to_path(&config, &path).unwrap();

        let loaded = crate::toml_loader::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn write_creates_directories_and_leaves_no_tmp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("griffin").join("config.toml");

        save_config_to_path(&GriffinConfig::default(), &path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn write_replaces_existing_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[bounds]\ndebounce_ms = 900\n").unwrap();

        save_config_to_path(&GriffinConfig::default(), &path).unwrap();
        let loaded = crate::toml_loader::load_from_path(&path).unwrap();
        assert_eq!(loaded.bounds.debounce_ms, 350);
    }

    #[test]
    fn unwritable_target_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let err = write_atomic(&blocker.join("config.toml"), "x").unwrap_err();
        assert!(matches!(err, ConfigError::WriteError(_)));
    }
}
