use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::ResourceUsage;

/// Outcome of one performance check, handed back to the orchestrator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckResult {
    watcher_name: String,
    watcher_group: Option<String>,
    is_valid: bool,
    description: String,
    delay: Duration,
    machine_name: Option<String>,
    resource_usage: ResourceUsage,
    checked_at: DateTime<Utc>,
}

impl CheckResult {
    pub(crate) fn new(
        watcher_name: &str,
        watcher_group: Option<&str>,
        is_valid: bool,
        delay: Duration,
        machine_name: Option<&str>,
        resource_usage: ResourceUsage,
        description: String,
    ) -> Self {
        CheckResult {
            watcher_name: watcher_name.to_string(),
            watcher_group: watcher_group.map(str::to_string),
            is_valid,
            description,
            delay,
            machine_name: machine_name.map(str::to_string),
            resource_usage,
            checked_at: Utc::now(),
        }
    }

    pub fn watcher_name(&self) -> &str {
        &self.watcher_name
    }

    pub fn watcher_group(&self) -> Option<&str> {
        self.watcher_group.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn machine_name(&self) -> Option<&str> {
        self.machine_name.as_deref()
    }

    pub fn resource_usage(&self) -> ResourceUsage {
        self.resource_usage
    }

    pub fn checked_at(&self) -> DateTime<Utc> {
        self.checked_at
    }
}
