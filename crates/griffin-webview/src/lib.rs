//! Rendering surfaces for tab content.
//!
//! - `SurfacePool`: one surface per tab, created on demand, attached only
//!   while the tab is in the active set
//! - `BoundsSynchronizer`: coalesces host-region geometry changes
//! - `RenderEngine`: the seam the pool drives; `WryEngine` is the
//!   production backend, serving requests on the UI thread
//! - Custom protocol and IPC bridge for the shell webview

pub mod bounds;
pub mod content;
pub mod engine;
pub mod events;
pub mod ipc;
pub mod pool;
pub mod wry_engine;

pub use bounds::BoundsSynchronizer;
pub use content::ContentProvider;
pub use engine::{LoadState, RenderEngine};
pub use events::{PageLoadState, SurfaceEvent};
pub use ipc::{IpcMessage, IPC_INIT_SCRIPT};
pub use pool::{ActiveSet, SurfaceHandle, SurfacePhase, SurfacePool};
pub use wry_engine::{WebViewConfig, WryEngine, WryHost};

/// Test doubles for the rendering engine.
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
