//! Race tasks spread over worker threads

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use interleave::model::{reachable_values, Granularity};
use interleave::*;
use parking_lot::Mutex;

use crate::common::waited;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_tasks_may_run_on_different_threads() {
    let threads = Arc::new(Mutex::new(HashSet::new()));

    let spawner = {
        let threads = Arc::clone(&threads);
        move |fut: BoxFuture<'static, ()>| {
            let threads = Arc::clone(&threads);
            tokio::spawn(
                async move {
                    threads.lock().insert(std::thread::current().id());
                    fut.await;
                }
                .boxed(),
            );
        }
    };

    let report = RaceDriver::new(waited(4, TimeUnit::from_millis(1)))
        .run(spawner)
        .await
        .unwrap();

    assert_eq!(report.observations.len(), 3);
    assert!(!threads.lock().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_results_stay_within_torn_model() {
    let reachable = reachable_values(1, &TaskScript::defaults(), Granularity::LoadStore);

    for seed in 0..20 {
        let report = RaceDriver::new(waited(seed, TimeUnit::from_millis(1)))
            .run(|fut| {
                tokio::spawn(fut);
            })
            .await
            .unwrap();

        let value = report.final_value.unwrap();
        assert!(reachable.contains(&value), "seed {seed} gave {value}");
    }
}
