use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),

    #[error("config write error: {0}")]
    WriteError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store read error: {0}")]
    ReadError(String),

    #[error("store write error: {0}")]
    WriteError(String),

    #[error("store parse error: {0}")]
    ParseError(String),
}

/// Failures reported by a rendering engine backend.
///
/// Only allocation failures escape the surface pool; everything else
/// degrades to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("surface allocation failed: {0}")]
    Allocation(String),

    #[error("rendering engine disconnected")]
    Disconnected,
}

#[derive(Debug, thiserror::Error)]
pub enum GriffinError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
