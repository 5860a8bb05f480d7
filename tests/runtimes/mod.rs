//! Runtime tests module: the same race on differently built tokio runtimes

use interleave::model::{reachable_values, Granularity};
use interleave::*;
use test_case::test_case;
use tokio::runtime::Builder;

use crate::common::{tokio_spawner, waited};

#[derive(Debug, Clone, Copy)]
enum Flavor {
    CurrentThread,
    MultiThread(usize),
}

fn run_on(flavor: Flavor, seed: u64) -> RaceReport {
    let runtime = match flavor {
        Flavor::CurrentThread => Builder::new_current_thread().enable_time().build(),
        Flavor::MultiThread(workers) => Builder::new_multi_thread()
            .worker_threads(workers)
            .enable_time()
            .build(),
    }
    .unwrap();

    runtime
        .block_on(RaceDriver::new(waited(seed, TimeUnit::from_millis(1))).run(tokio_spawner))
        .unwrap()
}

#[test_case(Flavor::CurrentThread ; "current thread")]
#[test_case(Flavor::MultiThread(1) ; "one worker")]
#[test_case(Flavor::MultiThread(4) ; "four workers")]
fn test_race_completes_on_runtime(flavor: Flavor) {
    let reachable = reachable_values(1, &TaskScript::defaults(), Granularity::LoadStore);

    for seed in 0..5 {
        let report = run_on(flavor, seed);
        assert_eq!(report.observations.len(), 3);
        assert!(reachable.contains(&report.final_value.unwrap()));
    }
}

#[test]
fn test_dropping_runtime_cancels_detached_tasks() {
    let runtime = Builder::new_multi_thread().enable_time().build().unwrap();
    let transcript = Transcript::new();

    let report = runtime
        .block_on(
            RaceDriver::new(RaceConfig::default().with_seed(9))
                .with_transcript(transcript.clone())
                .run(tokio_spawner),
        )
        .unwrap();

    // Same as the program exiting right after "Behold..."
    drop(runtime);

    // The incrementer sleeps at least one full unit, so it never gets to report
    let lines = transcript.lines();
    assert!(lines.len() <= 4, "{lines:?}");
    assert!(!lines.iter().any(|l| l.starts_with("Should be 4")));
    assert_eq!(report.counter.handle_count(), 1);
}
