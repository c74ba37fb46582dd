mod config;
mod error;
mod metrics;
mod registry;
mod watcher;

pub use config::{
    Configurator, ConfigureWatcher, EnsureThat, EnsureThatAsync, Validity, WatcherConfiguration,
    WatcherConfigurationBuilder, WatcherSettings, DEFAULT_DELAY,
};
pub use error::{BoxError, CheckPanicked, ConfigurationError, ExecutionError, UsageError};
pub use metrics::{ProviderFactory, ResourceUsage, SystemUsageSampler, UsageProvider};
pub use registry::{AddPerformanceWatcher, Registration, WatcherRegistry};
pub use watcher::{CheckResult, PerformanceWatcher, PerformanceWatcherBuilder, DEFAULT_NAME};
