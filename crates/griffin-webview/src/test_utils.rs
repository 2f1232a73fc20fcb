//! In-memory `RenderEngine` that records every call.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use griffin_common::{EngineError, PixelRect, TabId};
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::engine::{LoadState, RenderEngine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Create(TabId, String),
    Attach(TabId, Option<PixelRect>),
    Detach(TabId),
    SetBounds(TabId, PixelRect),
    Stop(TabId),
    Release(TabId),
}

struct FakeSurface {
    url: String,
    visible: bool,
    bounds: Option<PixelRect>,
    load: watch::Sender<LoadState>,
}

#[derive(Default)]
struct FakeState {
    live: HashMap<TabId, FakeSurface>,
    calls: Vec<EngineCall>,
    /// Allocations requested while a surface for the same tab was live.
    double_allocations: usize,
}

#[derive(Default)]
pub struct FakeEngine {
    state: Mutex<FakeState>,
    create_delay: Duration,
    release_delay: Duration,
    failing_urls: Mutex<HashSet<String>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_surface` take `delay` (virtual time under a paused
    /// runtime).
    pub fn with_create_delay(mut self, delay: Duration) -> Self {
        self.create_delay = delay;
        self
    }

    pub fn with_release_delay(mut self, delay: Duration) -> Self {
        self.release_delay = delay;
        self
    }

    /// Allocation for `url` fails from now on.
    pub fn fail_allocation_for(&self, url: &str) {
        self.failing_urls.lock().insert(url.to_string());
    }

    /// Drive a surface's navigation to `state`.
    pub fn finish_load(&self, tab: &TabId, state: LoadState) {
        if let Some(surface) = self.state.lock().live.get(tab) {
            surface.load.send_replace(state);
        }
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    pub fn allocations(&self, tab: &TabId) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, EngineCall::Create(t, _) if t == tab))
            .count()
    }

    pub fn double_allocations(&self) -> usize {
        self.state.lock().double_allocations
    }

    pub fn live_count(&self) -> usize {
        self.state.lock().live.len()
    }

    pub fn is_live(&self, tab: &TabId) -> bool {
        self.state.lock().live.contains_key(tab)
    }

    pub fn url_of(&self, tab: &TabId) -> Option<String> {
        self.state.lock().live.get(tab).map(|s| s.url.clone())
    }

    pub fn is_visible(&self, tab: &TabId) -> bool {
        self.state
            .lock()
            .live
            .get(tab)
            .is_some_and(|s| s.visible)
    }

    pub fn bounds_of(&self, tab: &TabId) -> Option<PixelRect> {
        self.state.lock().live.get(tab).and_then(|s| s.bounds)
    }

    /// Tabs whose surfaces are visible, sorted.
    pub fn visible(&self) -> Vec<TabId> {
        let state = self.state.lock();
        let mut tabs: Vec<TabId> = state
            .live
            .iter()
            .filter(|(_, s)| s.visible)
            .map(|(t, _)| t.clone())
            .collect();
        tabs.sort();
        tabs
    }

    pub fn set_bounds_count(&self, tab: &TabId) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, EngineCall::SetBounds(t, _) if t == tab))
            .count()
    }
}

#[async_trait]
impl RenderEngine for FakeEngine {
    async fn create_surface(
        &self,
        tab: &TabId,
        url: &str,
    ) -> Result<watch::Receiver<LoadState>, EngineError> {
        if !self.create_delay.is_zero() {
            tokio::time::sleep(self.create_delay).await;
        }
        if self.failing_urls.lock().contains(url) {
            return Err(EngineError::Allocation(format!("refused {url}")));
        }
        let mut state = self.state.lock();
        state.calls.push(EngineCall::Create(tab.clone(), url.to_string()));
        if state.live.contains_key(tab) {
            state.double_allocations += 1;
        }
        let (tx, rx) = watch::channel(LoadState::Loading);
        state.live.insert(
            tab.clone(),
            FakeSurface {
                url: url.to_string(),
                visible: false,
                bounds: None,
                load: tx,
            },
        );
        Ok(rx)
    }

    fn attach(&self, tab: &TabId, bounds: Option<PixelRect>) {
        let mut state = self.state.lock();
        state.calls.push(EngineCall::Attach(tab.clone(), bounds));
        if let Some(surface) = state.live.get_mut(tab) {
            surface.visible = true;
            if bounds.is_some() {
                surface.bounds = bounds;
            }
        }
    }

    fn detach(&self, tab: &TabId) {
        let mut state = self.state.lock();
        state.calls.push(EngineCall::Detach(tab.clone()));
        if let Some(surface) = state.live.get_mut(tab) {
            surface.visible = false;
        }
    }

    fn set_bounds(&self, tab: &TabId, bounds: PixelRect) {
        let mut state = self.state.lock();
        state.calls.push(EngineCall::SetBounds(tab.clone(), bounds));
        if let Some(surface) = state.live.get_mut(tab) {
            surface.bounds = Some(bounds);
        }
    }

    fn stop_loading(&self, tab: &TabId) {
        self.state.lock().calls.push(EngineCall::Stop(tab.clone()));
    }

    async fn release(&self, tab: &TabId) {
        if !self.release_delay.is_zero() {
            tokio::time::sleep(self.release_delay).await;
        }
        let mut state = self.state.lock();
        state.calls.push(EngineCall::Release(tab.clone()));
        state.live.remove(tab);
    }
}
