use std::sync::Arc;

use async_trait::async_trait;

use super::types::ResourceUsage;
use crate::error::UsageError;

/// Source of [`ResourceUsage`] readings for a performance check.
///
/// Implementations may suspend while sampling (the default sampler waits for
/// its configured delay). Test doubles can return a fixed reading immediately.
#[async_trait]
pub trait UsageProvider: Send + Sync {
    async fn resource_usage(&self) -> Result<ResourceUsage, UsageError>;
}

/// Creates a provider for each check execution.
pub type ProviderFactory = Arc<dyn Fn() -> Box<dyn UsageProvider> + Send + Sync>;

#[async_trait]
impl<P: UsageProvider + ?Sized> UsageProvider for Arc<P> {
    async fn resource_usage(&self) -> Result<ResourceUsage, UsageError> {
        (**self).resource_usage().await
    }
}
