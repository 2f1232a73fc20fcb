//! Change detection for the config file (`notify`, debounced).

mod config_watcher;


pub use config_watcher::{ConfigWatcher, WATCH_DEBOUNCE};
