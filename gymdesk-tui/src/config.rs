//! Dashboard configuration persisted in the settings store.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pages::PageKind;
use crate::settings::{SettingsError, SettingsProvider};

const ZEBRA_KEY: &str = "config/zebra";
const TICK_KEY: &str = "config/tick_ms";
const START_PAGE_KEY: &str = "config/start_page";
const LATENCY_KEY: &str = "config/store_latency_ms";

/// User-tunable dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Stripe alternate table rows.
    pub zebra: bool,
    /// Event poll interval in milliseconds.
    pub tick_ms: u64,
    /// Page shown at startup.
    pub start_page: PageKind,
    /// Simulated store latency, so loading states are visible.
    pub store_latency_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            zebra: true,
            tick_ms: 100,
            start_page: PageKind::Members,
            store_latency_ms: 300,
        }
    }
}

impl DashboardConfig {
    /// Read every key, falling back to defaults for missing ones.
    pub fn load(settings: &SettingsProvider) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        Ok(Self {
            zebra: settings.get_or(ZEBRA_KEY, defaults.zebra)?,
            tick_ms: settings.get_or(TICK_KEY, defaults.tick_ms)?,
            start_page: settings.get_or(START_PAGE_KEY, defaults.start_page)?,
            store_latency_ms: settings.get_or(LATENCY_KEY, defaults.store_latency_ms)?,
        })
    }

    pub fn save(&self, settings: &SettingsProvider) -> Result<(), SettingsError> {
        settings.set(ZEBRA_KEY, &self.zebra)?;
        settings.set(TICK_KEY, &self.tick_ms)?;
        settings.set(START_PAGE_KEY, &self.start_page)?;
        settings.set(LATENCY_KEY, &self.store_latency_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }

    pub fn store_latency(&self) -> Duration {
        Duration::from_millis(self.store_latency_ms)
    }
}
