// Basic execution tests for RaceDriver

use std::time::Duration;

use interleave::model::{reachable_values, Granularity};
use interleave::*;

use crate::common::{report_lines, tokio_spawner, waited};

#[tokio::test(start_paused = true)]
async fn test_default_config_detaches() {
    let driver = RaceDriver::new(RaceConfig::default());
    let report = driver.run(tokio_spawner).await.unwrap();

    assert_eq!(report.final_value, None);
    assert_eq!(driver.transcript().lines(), ["Start", "Behold..."]);
}

#[tokio::test(start_paused = true)]
async fn test_waited_run_prints_every_line() {
    let transcript = Transcript::new();
    let report = RaceDriver::new(waited(5, TimeUnit::SECOND))
        .with_transcript(transcript.clone())
        .run(tokio_spawner)
        .await
        .unwrap();

    let observed: Vec<i64> = report.observations.iter().map(|o| o.observed).collect();
    let lines = transcript.lines();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "Start");
    for line in report_lines(&observed) {
        assert!(lines.contains(&line), "missing {line}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_last_reporter_sees_final_value() {
    let transcript = Transcript::new();
    let report = RaceDriver::new(waited(8, TimeUnit::SECOND))
        .with_transcript(transcript.clone())
        .run(tokio_spawner)
        .await
        .unwrap();

    let last = transcript.lines().pop().unwrap();
    let final_value = report.final_value.unwrap();
    assert!(last.ends_with(&format!("but got {final_value}")), "{last}");
}

#[tokio::test(start_paused = true)]
async fn test_detached_counter_settles_later() {
    let report = RaceDriver::new(RaceConfig::default().with_seed(21))
        .run(tokio_spawner)
        .await
        .unwrap();
    assert_eq!(report.counter.handle_count(), 4);

    tokio::time::sleep(Duration::from_secs(12)).await;

    // Every task finished and released its handle
    assert_eq!(report.counter.handle_count(), 1);
    let reachable = reachable_values(1, &TaskScript::defaults(), Granularity::Atomic);
    assert!(reachable.contains(&report.counter.get()));
}
