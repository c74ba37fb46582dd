#![cfg(test)]

use super::{ResourceUsage, SystemUsageSampler, UsageProvider};
use crate::error::UsageError;
use std::time::{Duration, Instant};

#[test]
fn resource_usage_preserves_readings() {
    let readings = [
        (0.0, 0.0),
        (10.0, 1000.0),
        (99.5, 15872.25),
        (-3.0, -1.0),
        (250.0, 0.5),
    ];
    for (cpu, ram) in readings {
        let usage = ResourceUsage::new(cpu, ram);
        assert_eq!(usage.cpu(), cpu);
        assert_eq!(usage.ram(), ram);
    }
}

#[tokio::test]
async fn sampler_waits_for_delay_and_reports_memory() {
    let sampler = SystemUsageSampler::new(Duration::from_millis(100), None);
    let started = Instant::now();

    let usage = sampler.resource_usage().await.expect("local sample");

    assert!(started.elapsed() >= Duration::from_millis(100));
    assert!(usage.cpu() >= 0.0);
    assert!(usage.ram() > 0.0);
}

#[tokio::test]
async fn sampler_accepts_localhost_as_machine_name() {
    let sampler = SystemUsageSampler::new(Duration::from_millis(10), Some("localhost".to_string()));

    assert_eq!(sampler.delay(), Duration::from_millis(10));
    assert_eq!(sampler.machine_name(), Some("localhost"));
    assert!(sampler.resource_usage().await.is_ok());
}

#[tokio::test]
async fn sampler_rejects_unreachable_remote_machine() {
    let sampler = SystemUsageSampler::new(
        Duration::from_millis(10),
        Some("build-agent-42.invalid".to_string()),
    );
    let err = sampler.resource_usage().await.unwrap_err();

    match err {
        UsageError::RemoteMachine { machine } => assert_eq!(machine, "build-agent-42.invalid"),
        other => panic!("unexpected error: {other}"),
    }
}
