//! TabHost: the single writer of tab state.
//!
//! Every handler mutates the registry first and then calls `present`,
//! which derives what should be on screen and drives the pool there.

mod dispatch;
mod present;
mod transitions;


use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use griffin_common::{ConfigError, Event, EventBus, PixelRect, StoreError, TabId};
use griffin_config::GriffinConfig;
use griffin_tabs::store::{CHARTS_FILE, TABS_FILE};
use griffin_tabs::{ChartCatalog, JsonStore, TabRecord, TabRegistry, TabSnapshot};
use griffin_webview::{BoundsSynchronizer, RenderEngine, SurfacePool};

use crate::compositor::GridCompositor;
use crate::reclaimer::InactivityReclaimer;
use crate::view::{ShellState, TabView};

/// Where the registry snapshot and the chart catalog are persisted.
#[derive(Debug, Clone)]
pub struct HostStores {
    pub tabs: JsonStore,
    pub charts: JsonStore,
}

impl HostStores {
    pub fn in_data_dir() -> Result<Self, StoreError> {
        Ok(Self {
            tabs: JsonStore::in_data_dir(TABS_FILE)?,
            charts: JsonStore::in_data_dir(CHARTS_FILE)?,
        })
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            tabs: JsonStore::new(dir.join(TABS_FILE)),
            charts: JsonStore::new(dir.join(CHARTS_FILE)),
        }
    }
}

pub struct TabHost<E: RenderEngine> {
    registry: TabRegistry,
    charts: ChartCatalog,
    pool: Arc<SurfacePool<E>>,
    compositor: GridCompositor,
    bounds: BoundsSynchronizer,
    reclaimer: InactivityReclaimer,
    events: Arc<EventBus>,
    stores: Option<HostStores>,
    /// A modal is open in the shell; surfaces must not draw over it.
    overlay_open: bool,
    /// Host-region geometry last dispatched by the synchronizer.
    region: Option<PixelRect>,
    /// Whether the pool is currently driven in grid mode.
    in_grid: bool,
    /// What `present` last showed: active tab, multi-view, overlay.
    presented: Option<(Option<TabId>, bool, bool)>,
    /// Config file that settings changed from the shell are written to.
    config_file: Option<PathBuf>,
}

impl<E: RenderEngine> TabHost<E> {
    pub fn new(pool: Arc<SurfacePool<E>>, events: Arc<EventBus>) -> Self {
        Self {
            registry: TabRegistry::new(),
            charts: ChartCatalog::new(),
            pool,
            compositor: GridCompositor::default(),
            bounds: BoundsSynchronizer::default(),
            reclaimer: InactivityReclaimer::default(),
            events,
            stores: None,
            overlay_open: false,
            region: None,
            in_grid: false,
            presented: None,
            config_file: None,
        }
    }

    pub fn from_config(pool: Arc<SurfacePool<E>>, events: Arc<EventBus>, config: &GriffinConfig) -> Self {
        let mut host = Self::new(pool, events);
        host.compositor = GridCompositor::from_config(&config.grid, &config.bounds);
        host.bounds = BoundsSynchronizer::new(
            config.bounds.debounce(),
            i32::try_from(config.bounds.min_visible_px).unwrap_or(i32::MAX),
        );
        host.reclaimer = InactivityReclaimer::from_config(&config.surfaces);
        host
    }

    pub fn with_config_file(mut self, path: PathBuf) -> Self {
        self.config_file = Some(path);
        self
    }

    pub fn with_registry(mut self, registry: TabRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Load persisted tabs and charts, and save back to the same stores.
    /// A missing file starts empty; a corrupt one is an error.
    pub fn with_stores(mut self, stores: HostStores) -> Result<Self, StoreError> {
        let snapshot: TabSnapshot = stores.tabs.load()?;
        self.charts = stores.charts.load()?;
        self.registry = TabRegistry::from_snapshot(snapshot);
        tracing::info!(
            tabs = self.registry.list_active().len(),
            trash = self.registry.trash().len(),
            charts = self.charts.list().len(),
            "Restored tab state"
        );
        self.stores = Some(stores);
        Ok(self)
    }

    // -- Accessors --

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn charts(&self) -> &ChartCatalog {
        &self.charts
    }

    pub fn pool(&self) -> &Arc<SurfacePool<E>> {
        &self.pool
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn reclaimer(&self) -> &InactivityReclaimer {
        &self.reclaimer
    }

    pub fn compositor(&self) -> &GridCompositor {
        &self.compositor
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay_open
    }

    pub fn region(&self) -> Option<PixelRect> {
        self.region
    }

    // -- Lifecycle --

    /// Show whatever the restored registry says is active.
    pub async fn init(&mut self) -> Result<(), griffin_common::EngineError> {
        tracing::info!(active = ?self.registry.active_id().map(TabId::as_str), "Host starting");
        self.present().await
    }

    /// Tear down every surface and persist the final state.
    pub async fn shutdown(&mut self) {
        tracing::info!(surfaces = self.pool.len(), "Host shutting down");
        self.compositor.reset();
        self.in_grid = false;
        self.pool.shutdown().await;
        self.save_tabs();
        self.save_charts();
        self.events.publish(Event::Shutdown);
    }

    // -- Settings --

    pub fn set_inactivity_timeout(&mut self, timeout: Duration) {
        self.reclaimer.set_timeout(timeout);
    }

    /// The timeout chosen in the settings page: applied now and written to
    /// the config file so a reload or restart keeps it.
    pub fn change_inactivity_timeout(&mut self, minutes: u32) {
        self.set_inactivity_timeout(Duration::from_secs(u64::from(minutes) * 60));
        let Some(path) = &self.config_file else {
            return;
        };
        let mut config = match griffin_config::toml_loader::load_from_path(path) {
            Ok(config) => config,
            Err(ConfigError::FileNotFound(_)) => GriffinConfig::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Config unreadable, timeout not saved");
                return;
            }
        };
        if config.surfaces.inactivity_timeout_minutes == minutes {
            return;
        }
        config.surfaces.inactivity_timeout_minutes = minutes;
        if let Err(e) = griffin_config::save_config_to_path(&config, path) {
            tracing::warn!(error = %e, "Failed to save inactivity timeout");
        }
    }

    /// Pick up the live-reloadable parts of a new config.
    pub fn apply_config(&mut self, config: &GriffinConfig) {
        self.reclaimer.set_timeout(config.surfaces.inactivity_timeout());
        self.bounds.set_debounce(config.bounds.debounce());
        self.events.publish(Event::ConfigReloaded);
    }

    // -- Shell view --

    pub fn shell_state(&self) -> ShellState {
        let view = |record: &TabRecord| {
            TabView::new(record, self.pool.phase(&record.id), self.pool.is_loaded(&record.id))
        };
        ShellState {
            tabs: self.registry.list_active().iter().map(view).collect(),
            trash: self.registry.trash().iter().map(view).collect(),
            active_tab_id: self.registry.active_id().cloned(),
            multi_view_open: self.registry.multi_view_open(),
            multi_view_slots: self
                .registry
                .resolve_slots(self.registry.multi_view_slots())
                .to_vec(),
            panes: self.compositor.panes().to_vec(),
            overlay_open: self.overlay_open,
            charts: self.charts.list().to_vec(),
            inactivity_timeout_minutes: self.reclaimer.timeout().as_secs() / 60,
        }
    }

    // -- Persistence --

    fn save_tabs(&self) {
        if let Some(stores) = &self.stores {
            if let Err(e) = stores.tabs.save(&self.registry.snapshot()) {
                tracing::warn!(error = %e, "Failed to save tabs");
            }
        }
    }

    fn save_charts(&self) {
        if let Some(stores) = &self.stores {
            if let Err(e) = stores.charts.save(&self.charts) {
                tracing::warn!(error = %e, "Failed to save charts");
            }
        }
    }
}
