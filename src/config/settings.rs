use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{WatcherConfiguration, DEFAULT_DELAY};
use crate::error::ConfigurationError;
use crate::registry::Registration;
use crate::watcher::DEFAULT_NAME;

/// Serializable watcher settings, e.g. read from a JSON file shipped next to
/// the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherSettings {
    pub name: String,
    pub group: Option<String>,
    pub delay_ms: u64,
    pub machine_name: Option<String>,
    // Forwarded to the orchestrator on registration.
    pub interval_ms: Option<u64>,
}

impl Default for WatcherSettings {
    fn default() -> Self {
        WatcherSettings {
            name: DEFAULT_NAME.to_string(),
            group: None,
            delay_ms: DEFAULT_DELAY.as_millis() as u64,
            machine_name: None,
            interval_ms: None,
        }
    }
}

impl WatcherSettings {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(raw).map_err(|e| {
            ConfigurationError::InvalidSettings(format!("failed to parse watcher settings: {}", e))
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            ConfigurationError::InvalidSettings(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval_ms.map(Duration::from_millis)
    }

    pub fn to_configuration(&self) -> WatcherConfiguration {
        WatcherConfiguration::builder(Some(self.delay()), self.machine_name.as_deref()).build()
    }

    pub fn registration<H>(&self, hooks: Option<H>) -> Registration<H> {
        Registration {
            hooks,
            interval: self.interval(),
            group: self.group.clone(),
        }
    }
}
