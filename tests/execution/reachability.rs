//! Final values always come from some interleaving of the task bodies

use interleave::model::{reachable_values, serial_value, serial_values, Granularity};
use interleave::*;

use crate::common::{tokio_spawner, waited};

#[test]
fn test_documented_serial_orders() {
    let inc = TaskScript::increment();
    let mul = TaskScript::multiply();
    let dec = TaskScript::decrement();

    assert_eq!(serial_value(1, &[inc.clone(), mul.clone(), dec.clone()]), 6);
    assert_eq!(serial_value(1, &[dec, inc, mul]), 4);
}

#[test]
fn test_every_serial_value_is_reachable() {
    let scripts = TaskScript::defaults();
    let reachable = reachable_values(1, &scripts, Granularity::Atomic);
    assert!(reachable.is_superset(&serial_values(1, &scripts)));
}

#[tokio::test(start_paused = true)]
async fn test_observations_are_plausible_counter_values() {
    let scripts = TaskScript::defaults();
    let torn = reachable_values(1, &scripts, Granularity::LoadStore);
    let (lo, hi) = (*torn.first().unwrap(), *torn.last().unwrap());

    for seed in 100..120 {
        let report = RaceDriver::new(waited(seed, TimeUnit::SECOND))
            .run(tokio_spawner)
            .await
            .unwrap();

        for obs in &report.observations {
            assert!(
                (lo..=hi).contains(&obs.observed),
                "seed {seed}: {} saw {}",
                obs.task,
                obs.observed
            );
        }
    }
}
