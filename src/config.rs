// src/config.rs

mod settings;
mod validity;


use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;

use crate::error::BoxError;
use crate::metrics::{ProviderFactory, ResourceUsage, SystemUsageSampler, UsageProvider};

pub use settings::WatcherSettings;
pub use validity::{EnsureThat, EnsureThatAsync, Validity};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Read-only settings of a performance watcher.
#[derive(Clone)]
pub struct WatcherConfiguration {
    delay: Duration,
    machine_name: Option<String>,
    validity: Validity,
    provider_factory: ProviderFactory,
}

impl WatcherConfiguration {
    fn new(delay: Option<Duration>, machine_name: Option<&str>) -> Self {
        let delay = delay.unwrap_or(DEFAULT_DELAY);
        let machine_name = machine_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let sampler = SystemUsageSampler::new(delay, machine_name.clone());
        let provider_factory: ProviderFactory =
            Arc::new(move || Box::new(sampler.clone()) as Box<dyn UsageProvider>);

        WatcherConfiguration {
            delay,
            machine_name,
            validity: Validity::Always,
            provider_factory,
        }
    }

    /// Starts a configuration; `None` delay means [`DEFAULT_DELAY`], an empty
    /// machine name means the local machine.
    pub fn builder(
        delay: Option<Duration>,
        machine_name: Option<&str>,
    ) -> WatcherConfigurationBuilder {
        WatcherConfigurationBuilder {
            configuration: WatcherConfiguration::new(delay, machine_name),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn machine_name(&self) -> Option<&str> {
        self.machine_name.as_deref()
    }

    pub fn validity(&self) -> &Validity {
        &self.validity
    }

    pub fn create_provider(&self) -> Box<dyn UsageProvider> {
        (self.provider_factory)()
    }
}

impl Default for WatcherConfiguration {
    fn default() -> Self {
        WatcherConfiguration::new(None, None)
    }
}

impl fmt::Debug for WatcherConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatcherConfiguration")
            .field("delay", &self.delay)
            .field("machine_name", &self.machine_name)
            .field("validity", &self.validity)
            .finish_non_exhaustive()
    }
}

/// Setters shared by [`WatcherConfigurationBuilder`] and [`Configurator`].
pub trait ConfigureWatcher {
    fn configuration_mut(&mut self) -> &mut WatcherConfiguration;

    fn ensure_that<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&ResourceUsage) -> bool + Send + Sync + 'static,
    {
        self.try_ensure_that(move |usage: &ResourceUsage| Ok::<_, BoxError>(predicate(usage)))
    }

    /// Like [`ConfigureWatcher::ensure_that`], but the predicate may fail; the
    /// failure aborts the check with an execution error.
    fn try_ensure_that<F, E>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&ResourceUsage) -> Result<bool, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        let predicate: EnsureThat = Arc::new(move |usage: &ResourceUsage| {
            predicate(usage).map_err(Into::<BoxError>::into)
        });
        let configuration = self.configuration_mut();
        configuration.validity = std::mem::take(&mut configuration.validity).with_sync(predicate);
        self
    }

    fn ensure_that_async<F, Fut>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(ResourceUsage) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.try_ensure_that_async(move |usage: ResourceUsage| {
            predicate(usage).map(Ok::<_, BoxError>)
        })
    }

    fn try_ensure_that_async<F, Fut, E>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(ResourceUsage) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        let predicate: EnsureThatAsync = Arc::new(move |usage: ResourceUsage| {
            predicate(usage)
                .map(|res| res.map_err(Into::<BoxError>::into))
                .boxed()
        });
        let configuration = self.configuration_mut();
        configuration.validity = std::mem::take(&mut configuration.validity).with_async(predicate);
        self
    }

    /// Replaces the built-in sampler. The factory is called once per check.
    fn with_usage_provider<F, P>(&mut self, factory: F) -> &mut Self
    where
        F: Fn() -> P + Send + Sync + 'static,
        P: UsageProvider + 'static,
    {
        self.configuration_mut().provider_factory =
            Arc::new(move || Box::new(factory()) as Box<dyn UsageProvider>);
        self
    }
}

pub struct WatcherConfigurationBuilder {
    configuration: WatcherConfiguration,
}

impl WatcherConfigurationBuilder {
    pub fn build(&self) -> WatcherConfiguration {
        self.configuration.clone()
    }
}

impl ConfigureWatcher for WatcherConfigurationBuilder {
    fn configuration_mut(&mut self) -> &mut WatcherConfiguration {
        &mut self.configuration
    }
}

/// Adjusts a configuration in place, handed to configuration callbacks.
pub struct Configurator<'a> {
    configuration: &'a mut WatcherConfiguration,
}

impl<'a> Configurator<'a> {
    pub fn new(configuration: &'a mut WatcherConfiguration) -> Self {
        Configurator { configuration }
    }

    pub fn delay(&self) -> Duration {
        self.configuration.delay
    }

    pub fn machine_name(&self) -> Option<&str> {
        self.configuration.machine_name()
    }
}

impl ConfigureWatcher for Configurator<'_> {
    fn configuration_mut(&mut self) -> &mut WatcherConfiguration {
        self.configuration
    }
}
