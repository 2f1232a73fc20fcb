//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. The winit thread owns the window and every webview; the tab
//! host runs as a task on the tokio runtime and talks to this thread
//! through engine requests and `UserEvent`s.

mod chrome;
mod core;
mod event_handler;
mod init;
mod polling;
mod shell_bridge;
mod shutdown;
mod types;

pub use core::GriffinApp;
pub use types::UserEvent;
