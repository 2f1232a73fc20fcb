//! Surface lifecycle policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Surface lifecycle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Minutes a hidden tab may stay idle before its surface is
    /// hibernated. `0` disables hibernation.
    pub inactivity_timeout_minutes: u32,
    /// How often the reclaimer sweeps, in seconds.
    pub sweep_interval_secs: u32,
    /// User agent override for chart surfaces.
    pub user_agent: Option<String>,
    /// Allow the developer tools toggle on surfaces.
    pub devtools: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_minutes: 15,
            sweep_interval_secs: 60,
            user_agent: None,
            devtools: cfg!(debug_assertions),
        }
    }
}

impl SurfaceConfig {
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.inactivity_timeout_minutes) * 60)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.sweep_interval_secs))
    }
}
