//! Small Concurrency Demonstrations
//!
//! Four self-contained demos of basic concurrency primitives, each with a binary under
//! `src/bin/`:
//!
//! - **race**: three tasks update one shared counter with no lock. What each task sees, and
//!   what the counter ends up as, depends on how the scheduler interleaves them.
//! - **thread**: spawn an OS thread and carry on without joining it.
//! - **switch**: three coroutines on one thread hand control to each other at yields and
//!   sleeps.
//! - **poll**: the same, with coroutines switching while they wait on readiness polls.
//!
//! # The Race
//!
//! The counter starts at 1. Running alone, each task would see a tidy value:
//!
//! | Task        | Body                                               | Expects |
//! |-------------|----------------------------------------------------|---------|
//! | `increment` | pause 1–3, +1, pause 1–3, +1, pause 1–5, +1        | 4       |
//! | `multiply`  | pause 0–3, ×2                                      | 2       |
//! | `decrement` | −1, pause 0–4, −1                                  | −1      |
//!
//! Together they almost never do. The [`SharedCounter`] has no lock, and each update is a
//! separate load and store, so parallel tasks can even lose each other's writes.
//!
//! ```no_run
//! use interleave::{JoinPolicy, RaceConfig, RaceDriver, TimeUnit};
//!
//! # async {
//! let config = RaceConfig::default()
//!     .with_unit(TimeUnit::from_millis(10))
//!     .with_seed(42)
//!     .with_join(JoinPolicy::Wait);
//!
//! let report = RaceDriver::new(config)
//!     .run(|fut| { tokio::spawn(fut); })
//!     .await
//!     .unwrap();
//!
//! for obs in &report.observations {
//!     println!("{}: expected {}, saw {}", obs.task, obs.expected, obs.observed);
//! }
//! # };
//! ```
//!
//! ## Fire and Forget
//!
//! [`JoinPolicy::Detach`] is the default. The driver spawns the tasks, prints `Behold...`,
//! and returns without waiting. A program that exits at that point cuts the tasks off, so
//! its output is truncated. The `race` binary spawns through [`cli::ExitGate`] and drains it
//! before exiting, so the tasks finish even though nothing joined them.
//! [`JoinPolicy::Wait`] makes the driver itself wait.
//!
//! ## What Can the Counter End Up As?
//!
//! Not any value. [`model::reachable_values`] enumerates every interleaving that keeps each
//! task's own updates in order:
//!
//! ```
//! use interleave::model::{reachable_values, serial_value, Granularity};
//! use interleave::TaskScript;
//!
//! let scripts = TaskScript::defaults();
//!
//! // increment, then multiply, then decrement
//! assert_eq!(serial_value(1, &scripts), 6);
//!
//! let atomic = reachable_values(1, &scripts, Granularity::Atomic);
//! let torn = reachable_values(1, &scripts, Granularity::LoadStore);
//! assert!(atomic.contains(&6));
//! assert!(torn.is_superset(&atomic));
//! ```
//!
//! # Timing
//!
//! Every sleep is measured in a [`TimeUnit`], one second by default. Pauses are drawn from a
//! seedable generator; the seed used is always reported in [`RaceReport::seed`] so a run's
//! pauses can be replayed. The interleaving itself still belongs to the scheduler.
//!
//! # Tracing
//!
//! With the `tracing` feature (on by default) the library emits `tracing` events. The
//! binaries install a subscriber filtered by `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=interleave=trace cargo run --bin race -- --join
//! ```

pub mod cli;
pub mod coop;
mod counter;
mod delay;
pub mod detached;
mod error;
pub mod model;
mod race;
mod script;
mod transcript;

pub use counter::SharedCounter;
pub use delay::{DelayPlan, PlannedStep, TimeUnit};
pub use error::{DemoError, DemoResult};
pub use race::{JoinPolicy, Observation, RaceConfig, RaceDriver, RaceReport};
pub use script::{Op, Step, TaskScript};
pub use transcript::Transcript;
