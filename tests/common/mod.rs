// Common test utilities and helpers for the test suite

use futures::future::BoxFuture;
use interleave::{JoinPolicy, RaceConfig, TimeUnit};

/// Spawner for the ambient tokio runtime
pub fn tokio_spawner(fut: BoxFuture<'static, ()>) {
    tokio::spawn(fut);
}

/// Waited race with a fixed seed
#[allow(dead_code)]
pub fn waited(seed: u64, unit: TimeUnit) -> RaceConfig {
    RaceConfig::default()
        .with_seed(seed)
        .with_unit(unit)
        .with_join(JoinPolicy::Wait)
}

/// Lines each default task prints, in launch order, given what they observed
#[allow(dead_code)]
pub fn report_lines(observed: &[i64]) -> Vec<String> {
    [4, 2, -1]
        .iter()
        .zip(observed)
        .map(|(expected, seen)| format!("Should be {expected}, but got {seen}"))
        .collect()
}
