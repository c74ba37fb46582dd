use std::time::Duration;

use log::debug;

use crate::config::{Configurator, WatcherConfiguration};
use crate::error::ConfigurationError;
use crate::watcher::{PerformanceWatcher, DEFAULT_NAME};

/// Implemented by the orchestrator that schedules watchers. Hooks and the
/// check interval are opaque here and passed through unchanged.
pub trait WatcherRegistry {
    type Hooks;

    fn add_watcher(
        &mut self,
        watcher: PerformanceWatcher,
        hooks: Option<Self::Hooks>,
        interval: Option<Duration>,
    );
}

/// Orchestrator-side options for a registered watcher.
#[derive(Debug, Clone)]
pub struct Registration<H> {
    pub hooks: Option<H>,
    pub interval: Option<Duration>,
    pub group: Option<String>,
}

impl<H> Default for Registration<H> {
    fn default() -> Self {
        Registration {
            hooks: None,
            interval: None,
            group: None,
        }
    }
}

impl<H> Registration<H> {
    pub fn hooks(mut self, hooks: H) -> Self {
        self.hooks = Some(hooks);
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Registration shortcuts for performance watchers. A missing name falls
/// back to [`DEFAULT_NAME`].
pub trait AddPerformanceWatcher: WatcherRegistry {
    fn add_performance_watcher(
        &mut self,
        name: Option<&str>,
        delay: Option<Duration>,
        machine_name: Option<&str>,
        registration: Registration<Self::Hooks>,
    ) -> Result<&mut Self, ConfigurationError>;

    fn add_configured_performance_watcher<F>(
        &mut self,
        name: Option<&str>,
        delay: Option<Duration>,
        machine_name: Option<&str>,
        configurator: F,
        registration: Registration<Self::Hooks>,
    ) -> Result<&mut Self, ConfigurationError>
    where
        F: FnOnce(&mut Configurator<'_>);

    fn add_performance_watcher_with(
        &mut self,
        name: Option<&str>,
        configuration: WatcherConfiguration,
        registration: Registration<Self::Hooks>,
    ) -> Result<&mut Self, ConfigurationError>;
}

impl<R: WatcherRegistry> AddPerformanceWatcher for R {
    fn add_performance_watcher(
        &mut self,
        name: Option<&str>,
        delay: Option<Duration>,
        machine_name: Option<&str>,
        registration: Registration<Self::Hooks>,
    ) -> Result<&mut Self, ConfigurationError> {
        self.add_configured_performance_watcher(name, delay, machine_name, |_| {}, registration)
    }

    fn add_configured_performance_watcher<F>(
        &mut self,
        name: Option<&str>,
        delay: Option<Duration>,
        machine_name: Option<&str>,
        configurator: F,
        registration: Registration<Self::Hooks>,
    ) -> Result<&mut Self, ConfigurationError>
    where
        F: FnOnce(&mut Configurator<'_>),
    {
        let watcher = PerformanceWatcher::configure(
            name.unwrap_or(DEFAULT_NAME),
            delay,
            machine_name,
            configurator,
            registration.group.as_deref(),
        )?;
        Ok(register(self, watcher, registration))
    }

    fn add_performance_watcher_with(
        &mut self,
        name: Option<&str>,
        configuration: WatcherConfiguration,
        registration: Registration<Self::Hooks>,
    ) -> Result<&mut Self, ConfigurationError> {
        let watcher = PerformanceWatcher::new(
            name.unwrap_or(DEFAULT_NAME),
            configuration,
            registration.group.as_deref(),
        )?;
        Ok(register(self, watcher, registration))
    }
}

fn register<R: WatcherRegistry>(
    registry: &mut R,
    watcher: PerformanceWatcher,
    registration: Registration<R::Hooks>,
) -> &mut R {
    debug!(
        "registering {} (group {:?}, interval {:?})",
        watcher.name(),
        watcher.group(),
        registration.interval
    );
    registry.add_watcher(watcher, registration.hooks, registration.interval);
    registry
}
