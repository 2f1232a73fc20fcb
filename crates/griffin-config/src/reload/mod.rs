//! Live config reload built on [`ConfigWatcher`](crate::watcher::ConfigWatcher).

mod manager;

pub use manager::ReloadManager;
