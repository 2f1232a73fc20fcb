//! Host controller for griffin.
//!
//! Owns the tab registry and the surface pool and turns every user or
//! shell action into an explicit state transition: registry mutation
//! first, then the pool work needed to make the visible surfaces match.

pub mod commands;
pub mod compositor;
pub mod host;
pub mod reclaimer;
pub mod service;
pub mod view;

pub use commands::{HostCommand, HostUpdate};
pub use compositor::{GridCompositor, Pane};
pub use host::{HostStores, TabHost};
pub use reclaimer::InactivityReclaimer;
pub use service::{HostHandle, HostRequest, HostService, UpdateSink};
pub use view::{ShellState, TabView};
