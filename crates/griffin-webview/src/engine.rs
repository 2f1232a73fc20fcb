//! The rendering-engine seam driven by the surface pool.

use async_trait::async_trait;
use griffin_common::{EngineError, PixelRect, TabId};
use tokio::sync::watch;

/// Navigation progress of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    /// Terminal failure. The surface stays usable and can be destroyed or
    /// recreated.
    Failed,
}

/// A backend that owns the actual surface instances, keyed by tab.
///
/// Allocation and teardown are asynchronous; visibility and geometry are
/// fire-and-forget.
#[async_trait]
pub trait RenderEngine: Send + Sync + 'static {
    /// Allocate a hidden surface for `tab` and start navigating to `url`.
    async fn create_surface(
        &self,
        tab: &TabId,
        url: &str,
    ) -> Result<watch::Receiver<LoadState>, EngineError>;

    /// Make the surface visible, applying `bounds` first when known.
    fn attach(&self, tab: &TabId, bounds: Option<PixelRect>);

    fn detach(&self, tab: &TabId);

    fn set_bounds(&self, tab: &TabId, bounds: PixelRect);

    /// Abort an in-flight navigation.
    fn stop_loading(&self, tab: &TabId);

    /// Free the surface. Resolves once the backend no longer references it.
    async fn release(&self, tab: &TabId);
}
