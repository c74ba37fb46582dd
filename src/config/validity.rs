use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::BoxError;
use crate::metrics::ResourceUsage;

pub type EnsureThat = Arc<dyn Fn(&ResourceUsage) -> Result<bool, BoxError> + Send + Sync>;
pub type EnsureThatAsync =
    Arc<dyn Fn(ResourceUsage) -> BoxFuture<'static, Result<bool, BoxError>> + Send + Sync>;

/// Which validity predicates a watcher applies to each reading.
#[derive(Clone, Default)]
pub enum Validity {
    /// No predicate, every reading is valid.
    #[default]
    Always,
    Sync(EnsureThat),
    Async(EnsureThatAsync),
    Both {
        ensure_that: EnsureThat,
        ensure_that_async: EnsureThatAsync,
    },
}

impl Validity {
    pub(crate) fn with_sync(self, predicate: EnsureThat) -> Self {
        match self {
            Validity::Always | Validity::Sync(_) => Validity::Sync(predicate),
            Validity::Async(ensure_that_async)
            | Validity::Both {
                ensure_that_async, ..
            } => Validity::Both {
                ensure_that: predicate,
                ensure_that_async,
            },
        }
    }

    pub(crate) fn with_async(self, predicate: EnsureThatAsync) -> Self {
        match self {
            Validity::Always | Validity::Async(_) => Validity::Async(predicate),
            Validity::Sync(ensure_that) | Validity::Both { ensure_that, .. } => Validity::Both {
                ensure_that,
                ensure_that_async: predicate,
            },
        }
    }

    pub fn ensure_that(&self) -> Option<&EnsureThat> {
        match self {
            Validity::Sync(ensure_that) | Validity::Both { ensure_that, .. } => Some(ensure_that),
            _ => None,
        }
    }

    pub fn ensure_that_async(&self) -> Option<&EnsureThatAsync> {
        match self {
            Validity::Async(ensure_that_async)
            | Validity::Both {
                ensure_that_async, ..
            } => Some(ensure_that_async),
            _ => None,
        }
    }

    /// Async predicate first, then the sync one. Both run whenever present,
    /// even when the first already reported an invalid reading.
    pub async fn evaluate(&self, usage: &ResourceUsage) -> Result<bool, BoxError> {
        let mut is_valid = true;
        if let Some(ensure_that_async) = self.ensure_that_async() {
            is_valid = ensure_that_async(*usage).await?;
        }
        if let Some(ensure_that) = self.ensure_that() {
            let sync_valid = ensure_that(usage)?;
            is_valid = is_valid && sync_valid;
        }
        Ok(is_valid)
    }

    fn label(&self) -> &'static str {
        match self {
            Validity::Always => "always",
            Validity::Sync(_) => "sync",
            Validity::Async(_) => "async",
            Validity::Both { .. } => "sync+async",
        }
    }
}

impl std::fmt::Debug for Validity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
