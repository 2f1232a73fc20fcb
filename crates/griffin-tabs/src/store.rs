//! JSON persistence for the tab snapshot and the chart catalog.
//!
//! Writes go to a `.tmp` sibling first and are renamed into place.

use std::path::{Path, PathBuf};

use griffin_common::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const TABS_FILE: &str = "tabs.json";
pub const CHARTS_FILE: &str = "charts.json";

/// Platform data directory for griffin.
pub fn default_data_dir() -> Result<PathBuf, StoreError> {
    dirs::data_dir()
        .map(|d| d.join("griffin"))
        .ok_or_else(|| StoreError::ReadError("could not determine data directory".into()))
}

/// One JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `file` inside the platform data directory.
    pub fn in_data_dir(file: &str) -> Result<Self, StoreError> {
        Ok(Self::new(default_data_dir()?.join(file)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, or the default value when the file is missing.
    pub fn load<T: DeserializeOwned + Default>(&self) -> Result<T, StoreError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No stored state, starting empty");
            return Ok(T::default());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            StoreError::ReadError(format!("failed to read {}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            StoreError::ParseError(format!("failed to parse {}: {e}", self.path.display()))
        })
    }

    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| StoreError::WriteError(format!("failed to serialize: {e}")))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::WriteError(format!(
                    "failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json).map_err(|e| {
            StoreError::WriteError(format!("failed to write {}: {e}", tmp_path.display()))
        })?;

        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            tracing::warn!("atomic rename failed ({}), falling back to direct write", e);
            std::fs::write(&self.path, &json).map_err(|e2| {
                StoreError::WriteError(format!("failed to write {}: {e2}", self.path.display()))
            })?;
        }

        tracing::debug!(path = %self.path.display(), "State saved to disk");
        Ok(())
    }
}
