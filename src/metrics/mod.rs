mod provider;
mod sampler;
#[cfg(test)]
mod tests;
mod types;

pub use provider::{ProviderFactory, UsageProvider};
pub use sampler::SystemUsageSampler;
pub use types::ResourceUsage;
