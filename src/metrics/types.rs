use serde::{Deserialize, Serialize};

/// A single CPU / memory reading.
///
/// `cpu` is a utilization percentage (usually 0-100) and `ram` the available
/// memory in megabytes. Values are stored as given; providers are responsible
/// for sane readings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    cpu: f64,
    ram: f64,
}

impl ResourceUsage {
    pub fn new(cpu: f64, ram: f64) -> Self {
        ResourceUsage { cpu, ram }
    }

    pub fn cpu(&self) -> f64 {
        self.cpu
    }

    pub fn ram(&self) -> f64 {
        self.ram
    }
}
