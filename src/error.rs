use std::any::Any;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Raised while building a watcher or its configuration. Never returned by
/// [`crate::PerformanceWatcher::execute`].
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Watcher name can not be empty.")]
    EmptyName,
    #[error("Performance Watcher configuration has not been provided.")]
    MissingConfiguration,
    #[error("invalid watcher settings: {0}")]
    InvalidSettings(String),
}

/// Faults raised by a [`crate::UsageProvider`] while reading counters.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("processor list is empty")]
    NoProcessors,
    #[error("remote performance counters are not available for machine '{machine}'")]
    RemoteMachine { machine: String },
    #[error(transparent)]
    Other(#[from] BoxError),
}

/// A provider or predicate panicked during a check.
#[derive(Debug, Error)]
#[error("performance check panicked: {message}")]
pub struct CheckPanicked {
    message: String,
}

impl CheckPanicked {
    pub(crate) fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => payload
                .downcast_ref::<&str>()
                .map(|message| message.to_string())
                .unwrap_or_else(|| "unknown panic".to_string()),
        };
        CheckPanicked { message }
    }
}

/// The only error surfaced by a check execution. The provider or predicate
/// fault that caused it is available through `source()`.
#[derive(Debug, Error)]
#[error("There was an error while trying to calculate performance.")]
pub struct ExecutionError {
    #[source]
    source: BoxError,
}

impl ExecutionError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        ExecutionError {
            source: source.into(),
        }
    }
}
