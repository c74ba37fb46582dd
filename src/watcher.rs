mod check_result;

use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

use futures::FutureExt;
use log::{debug, warn};

use crate::config::{Configurator, WatcherConfiguration, WatcherSettings};
use crate::error::{BoxError, CheckPanicked, ConfigurationError, ExecutionError};
use crate::metrics::ResourceUsage;

pub use check_result::CheckResult;

pub const DEFAULT_NAME: &str = "Performance Watcher";

/// Samples CPU and memory usage and checks the reading against the configured
/// validity predicates.
///
/// The configuration is read-only once the watcher exists, so concurrent
/// [`PerformanceWatcher::execute`] calls share no mutable state.
#[derive(Debug, Clone)]
pub struct PerformanceWatcher {
    name: String,
    group: Option<String>,
    configuration: WatcherConfiguration,
}

impl PerformanceWatcher {
    pub fn new(
        name: &str,
        configuration: WatcherConfiguration,
        group: Option<&str>,
    ) -> Result<Self, ConfigurationError> {
        if name.is_empty() {
            return Err(ConfigurationError::EmptyName);
        }
        Ok(PerformanceWatcher {
            name: name.to_string(),
            group: group.map(str::to_string),
            configuration,
        })
    }

    pub fn builder() -> PerformanceWatcherBuilder {
        PerformanceWatcherBuilder::default()
    }

    /// Watcher named [`DEFAULT_NAME`] using the built-in sampler.
    pub fn with_defaults(
        delay: Option<Duration>,
        machine_name: Option<&str>,
        group: Option<&str>,
    ) -> Result<Self, ConfigurationError> {
        Self::configure(DEFAULT_NAME, delay, machine_name, |_| {}, group)
    }

    /// Builds the configuration from `delay`/`machine_name`, then lets
    /// `configurator` add predicates or a custom provider.
    pub fn configure<F>(
        name: &str,
        delay: Option<Duration>,
        machine_name: Option<&str>,
        configurator: F,
        group: Option<&str>,
    ) -> Result<Self, ConfigurationError>
    where
        F: FnOnce(&mut Configurator<'_>),
    {
        let mut configuration = WatcherConfiguration::builder(delay, machine_name).build();
        configurator(&mut Configurator::new(&mut configuration));
        Self::new(name, configuration, group)
    }

    pub fn from_settings(settings: &WatcherSettings) -> Result<Self, ConfigurationError> {
        Self::new(
            &settings.name,
            settings.to_configuration(),
            settings.group.as_deref(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn configuration(&self) -> &WatcherConfiguration {
        &self.configuration
    }

    /// Runs one check. Provider and predicate faults, panics included, are
    /// reported as a single [`ExecutionError`]; nothing is retried.
    pub async fn execute(&self) -> Result<CheckResult, ExecutionError> {
        let started = Instant::now();
        let outcome = AssertUnwindSafe(self.check())
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(CheckPanicked::from_payload(payload).into()));
        match outcome {
            Ok(result) => {
                debug!(
                    "{} finished in {:?}: {}",
                    self.name,
                    started.elapsed(),
                    result.description()
                );
                Ok(result)
            }
            Err(err) => {
                warn!("{} failed: {}", self.name, err);
                Err(ExecutionError::new(err))
            }
        }
    }

    async fn check(&self) -> Result<CheckResult, BoxError> {
        let provider = self.configuration.create_provider();
        let usage = provider.resource_usage().await?;
        let is_valid = self.configuration.validity().evaluate(&usage).await?;

        Ok(CheckResult::new(
            &self.name,
            self.group.as_deref(),
            is_valid,
            self.configuration.delay(),
            self.configuration.machine_name(),
            usage,
            describe(is_valid, &usage),
        ))
    }
}

fn describe(is_valid: bool, usage: &ResourceUsage) -> String {
    format!(
        "Performance check has returned {} result for CPU usage: {:.2}%, RAM usage: {} MB.",
        if is_valid { "valid" } else { "invalid" },
        usage.cpu(),
        usage.ram()
    )
}

#[derive(Debug, Default)]
pub struct PerformanceWatcherBuilder {
    name: Option<String>,
    group: Option<String>,
    configuration: Option<WatcherConfiguration>,
}

impl PerformanceWatcherBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn configuration(mut self, configuration: WatcherConfiguration) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// Name falls back to [`DEFAULT_NAME`]; a configuration is required.
    pub fn build(self) -> Result<PerformanceWatcher, ConfigurationError> {
        let name = self.name.unwrap_or_else(|| DEFAULT_NAME.to_string());
        if name.is_empty() {
            return Err(ConfigurationError::EmptyName);
        }
        let configuration = self
            .configuration
            .ok_or(ConfigurationError::MissingConfiguration)?;
        PerformanceWatcher::new(&name, configuration, self.group.as_deref())
    }
}
