//! Hibernation of idle surfaces.
//!
//! A sweep destroys the surfaces of normal tabs that have not been the
//! active tab for longer than the inactivity timeout. Tab records are
//! never touched, so a hibernated tab is recreated from its URL the next
//! time it is shown.

use std::time::Duration;

use chrono::{DateTime, Utc};
use griffin_common::TabId;
use griffin_config::schema::SurfaceConfig;
use griffin_tabs::TabRecord;
use griffin_webview::{RenderEngine, SurfacePool};

const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
pub struct InactivityReclaimer {
    timeout: Duration,
    interval: Duration,
}

impl Default for InactivityReclaimer {
    fn default() -> Self {
        Self::from_config(&SurfaceConfig::default())
    }
}

impl InactivityReclaimer {
    /// A zero `timeout` disables reclamation.
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self {
            timeout,
            interval: interval.max(MIN_SWEEP_INTERVAL),
        }
    }

    pub fn from_config(config: &SurfaceConfig) -> Self {
        Self::new(config.inactivity_timeout(), config.sweep_interval())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        !self.timeout.is_zero()
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        if timeout != self.timeout {
            tracing::info!(timeout_secs = timeout.as_secs(), "Inactivity timeout changed");
            self.timeout = timeout;
        }
    }

    /// Tabs whose surfaces may be reclaimed at `now`.
    ///
    /// `protected` holds every tab currently shown (the active tab and any
    /// tab attached in a grid slot). A `last_accessed` in the future is
    /// treated as a clock anomaly and never qualifies.
    pub fn eligible(&self, records: &[TabRecord], protected: &[TabId], now: DateTime<Utc>) -> Vec<TabId> {
        if !self.is_enabled() {
            return Vec::new();
        }
        let Ok(timeout) = chrono::Duration::from_std(self.timeout) else {
            return Vec::new();
        };

        records
            .iter()
            .filter(|record| record.owns_surface())
            .filter(|record| !protected.contains(&record.id))
            .filter(|record| match record.last_accessed {
                Some(last) if last <= now => now.signed_duration_since(last) > timeout,
                _ => false,
            })
            .map(|record| record.id.clone())
            .collect()
    }

    /// Destroy the live surfaces of every eligible tab. Returns the tabs
    /// that were hibernated.
    pub async fn sweep<E: RenderEngine>(
        &self,
        records: &[TabRecord],
        protected: &[TabId],
        pool: &SurfacePool<E>,
        now: DateTime<Utc>,
    ) -> Vec<TabId> {
        let candidates: Vec<TabId> = self
            .eligible(records, protected, now)
            .into_iter()
            .filter(|id| pool.contains(id))
            .collect();

        for id in &candidates {
            tracing::info!(tab_id = %id, "Hibernating idle surface");
            pool.destroy(id).await;
        }
        candidates
    }
}
