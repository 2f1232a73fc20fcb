//! Reload manager: loads the config, watches it, republishes on change.

use crate::schema::GriffinConfig;
use crate::toml_loader;
use crate::validation;
use crate::watcher::ConfigWatcher;
use std::path::PathBuf;
use tokio::sync::{broadcast, watch};
use tracing::{error, info, warn};

/// Publishes freshly loaded configs through a [`watch`] channel whenever
/// the file changes on disk. Invalid edits are ignored and the last good
/// config stays current.
pub struct ReloadManager {
    config_path: PathBuf,
}

impl ReloadManager {
    /// Load the initial config and spawn the watch loop on the current
    /// tokio runtime.
    pub fn start(config_path: PathBuf) -> (GriffinConfig, watch::Receiver<GriffinConfig>) {
        let initial = match toml_loader::load_from_path(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("failed to load config: {e}, using defaults");
                GriffinConfig::default()
            }
        };

        let (config_tx, config_rx) = watch::channel(initial.clone());

        let manager = ReloadManager { config_path };
        tokio::spawn(async move {
            manager.run_watch_loop(config_tx).await;
        });

        (initial, config_rx)
    }

    async fn run_watch_loop(&self, config_tx: watch::Sender<GriffinConfig>) {
        let watcher = match ConfigWatcher::new(self.config_path.clone()) {
            Ok(w) => w,
            Err(e) => {
                error!("failed to create config watcher: {e}");
                return;
            }
        };

        let (change_tx, mut change_rx) = broadcast::channel::<()>(16);
        tokio::spawn(async move {
            if let Err(e) = watcher.watch(change_tx).await {
                error!("config watcher stopped: {e}");
            }
        });

        while change_rx.recv().await.is_ok() {
            match self.reload() {
                Some(config) => {
                    info!("config reloaded");
                    if config_tx.send(config).is_err() {
                        break;
                    }
                }
                None => warn!("config reload skipped, keeping previous config"),
            }
        }
    }

    fn reload(&self) -> Option<GriffinConfig> {
        let config = match toml_loader::load_from_path(&self.config_path) {
            Ok(c) => c,
            Err(e) => {
                warn!("config reload failed: {e}");
                return None;
            }
        };
        if let Err(e) = validation::validate(&config) {
            warn!("reloaded config rejected: {e}");
            return None;
        }
        Some(config)
    }
}
