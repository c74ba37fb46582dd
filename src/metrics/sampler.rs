use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::debug;
use sysinfo::{System, MINIMUM_CPU_UPDATE_INTERVAL};
use tokio::time::sleep;

use super::provider::UsageProvider;
use super::types::ResourceUsage;
use crate::error::UsageError;

const BYTES_PER_MEGABYTE: f64 = 1_048_576.0;

/// Default provider: two readings of the OS counters separated by `delay`.
///
/// CPU usage is only meaningful over a non-zero window. Shorter delays than
/// [`MINIMUM_CPU_UPDATE_INTERVAL`] are accepted but give unreliable CPU values.
#[derive(Clone, Debug)]
pub struct SystemUsageSampler {
    delay: Duration,
    machine_name: Option<String>,
}

impl SystemUsageSampler {
    pub fn new(delay: Duration, machine_name: Option<String>) -> Self {
        SystemUsageSampler {
            delay,
            machine_name,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn machine_name(&self) -> Option<&str> {
        self.machine_name.as_deref()
    }

    fn open_counters(&self) -> Result<System, UsageError> {
        if let Some(machine) = self.machine_name.as_deref() {
            if !is_local_machine(machine) {
                return Err(UsageError::RemoteMachine {
                    machine: machine.to_string(),
                });
            }
        }
        Ok(System::new())
    }
}

#[async_trait]
impl UsageProvider for SystemUsageSampler {
    async fn resource_usage(&self) -> Result<ResourceUsage, UsageError> {
        let started = Instant::now();
        let mut system = self.open_counters()?;

        if self.delay < MINIMUM_CPU_UPDATE_INTERVAL {
            debug!(
                "sampling delay {:?} is below {:?}, cpu reading may be unreliable",
                self.delay, MINIMUM_CPU_UPDATE_INTERVAL
            );
        }

        // Baseline reading, discarded.
        system.refresh_cpu();
        system.refresh_memory();
        sleep(self.delay).await;
        system.refresh_cpu();
        system.refresh_memory();

        let cpus = system.cpus();
        if cpus.is_empty() {
            return Err(UsageError::NoProcessors);
        }

        let total_usage = cpus.iter().map(|cpu| cpu.cpu_usage()).sum::<f32>() / cpus.len() as f32;
        let available_mb = system.available_memory() as f64 / BYTES_PER_MEGABYTE;

        debug!(
            "sampled cpu {:.2}% and {:.0} MB available in {:?}",
            total_usage,
            available_mb,
            started.elapsed()
        );

        Ok(ResourceUsage::new(f64::from(total_usage), available_mb))
    }
}

fn is_local_machine(machine: &str) -> bool {
    let machine = machine.trim();
    if machine == "."
        || machine.eq_ignore_ascii_case("localhost")
        || machine == "127.0.0.1"
        || machine == "::1"
    {
        return true;
    }
    System::host_name()
        .map(|host| host.eq_ignore_ascii_case(machine))
        .unwrap_or(false)
}
