//! Debounced notify watcher for the config file.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use griffin_common::ConfigError;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

/// Quiet period after the last file event before a reload is signalled.
pub const WATCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Watches one config file. Editors often replace the file instead of
/// writing it in place, so the parent directory is watched and events are
/// filtered by file name.
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    pub fn new(path: PathBuf) -> Result<Self, ConfigError> {
        if path.file_name().is_none() {
            return Err(ConfigError::WatchError(format!(
                "{} does not name a file",
                path.display()
            )));
        }
        if !path.exists() {
            warn!(path = %path.display(), "Config file missing, watching for creation");
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Send `()` on `tx` once per settled burst of changes. Runs until the
    /// notify backend goes away.
    pub async fn watch(&self, tx: broadcast::Sender<()>) -> Result<(), ConfigError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = self.path.file_name().unwrap_or_default().to_os_string();

        let (raw_tx, mut raw_rx) = mpsc::channel::<()>(16);
        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) if touches_file(&event, &file_name) => {
                    let _ = raw_tx.try_send(());
                }
                Ok(_) => {}
                Err(e) => error!("config watcher error: {e}"),
            },
            notify::Config::default(),
        )
        .map_err(|e| ConfigError::WatchError(format!("cannot create watcher: {e}")))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::WatchError(format!("cannot watch {}: {e}", dir.display())))?;
        info!(path = %self.path.display(), "Watching config file");

        while settle(&mut raw_rx, WATCH_DEBOUNCE).await {
            debug!("Config file changed");
            if tx.send(()).is_err() {
                debug!("No reload listeners");
            }
        }
        Ok(())
    }
}

/// Whether a notify event creates or modifies the watched file.
pub(crate) fn touches_file(event: &Event, file_name: &OsStr) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event.paths.iter().any(|p| p.file_name() == Some(file_name))
}

/// Wait for one burst of signals to go quiet for `quiet`. Returns false
/// once the sender side is closed.
pub(crate) async fn settle(rx: &mut mpsc::Receiver<()>, quiet: Duration) -> bool {
    if rx.recv().await.is_none() {
        return false;
    }
    loop {
        match tokio::time::timeout(quiet, rx.recv()).await {
            Err(_) => return true,
            Ok(Some(())) => continue,
            Ok(None) => return false,
        }
    }
}
