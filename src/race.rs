//! The racy counter driver.
//!
//! Launches one task per [`TaskScript`] against a single [`SharedCounter`] and lets them
//! race. Nothing orders their updates. Each task prints the value it expected next to the
//! value it actually saw.
//!
//! By default the driver does not wait for its tasks: it spawns them, prints `Behold...`, and
//! returns. A program that exits right after that may cut the tasks off mid-flight. Use
//! [`JoinPolicy::Wait`] to collect every observation and the final counter value.

use std::panic::AssertUnwindSafe;

use futures::channel::mpsc;
use futures::future::BoxFuture;
use futures::{FutureExt, StreamExt};

#[cfg(feature = "tracing")]
use tracing::{debug, error, info, trace};

use crate::counter::SharedCounter;
use crate::delay::{random_seed, DelayPlan, PlannedStep, TimeUnit};
use crate::error::{DemoError, DemoResult};
use crate::script::TaskScript;
use crate::transcript::Transcript;

/// Whether [`RaceDriver::run`] waits for the tasks it spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinPolicy {
    /// Return as soon as every task is spawned
    #[default]
    Detach,
    /// Wait for every task and report the final value
    Wait,
}

/// Settings for one race.
#[derive(Debug, Clone)]
pub struct RaceConfig {
    pub initial: i64,
    pub unit: TimeUnit,
    pub seed: Option<u64>,
    pub join: JoinPolicy,
    pub scripts: Vec<TaskScript>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            initial: 1,
            unit: TimeUnit::default(),
            seed: None,
            join: JoinPolicy::default(),
            scripts: TaskScript::defaults(),
        }
    }
}

impl RaceConfig {
    pub fn with_initial(mut self, initial: i64) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_join(mut self, join: JoinPolicy) -> Self {
        self.join = join;
        self
    }

    pub fn with_scripts(mut self, scripts: Vec<TaskScript>) -> Self {
        self.scripts = scripts;
        self
    }

    fn validate(&self) -> DemoResult<()> {
        if self.scripts.is_empty() {
            return Err(DemoError::InvalidConfig {
                message: "a race needs at least one task".to_string(),
            });
        }
        self.scripts.iter().try_for_each(TaskScript::validate)
    }
}

/// What one task reported when it finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub task: &'static str,
    pub expected: i64,
    pub observed: i64,
}

impl Observation {
    /// True when interference from the other tasks changed what this task saw.
    pub fn was_disturbed(&self) -> bool {
        self.expected != self.observed
    }
}

/// Outcome of [`RaceDriver::run`].
#[derive(Debug, Clone)]
pub struct RaceReport {
    /// Seed the pauses were drawn from; pass it back through [`RaceConfig::with_seed`] to
    /// replay the same pauses
    pub seed: u64,
    /// Observations in launch order. Empty when the driver did not wait.
    pub observations: Vec<Observation>,
    /// Counter value after every task finished. `None` when the driver did not wait.
    pub final_value: Option<i64>,
    /// Handle to the raced counter; still live while detached tasks run
    pub counter: SharedCounter,
}

/// Launches racing tasks through a caller-supplied spawner.
///
/// # Examples
///
/// ```no_run
/// use interleave::{JoinPolicy, RaceConfig, RaceDriver, TimeUnit};
///
/// # async {
/// let config = RaceConfig::default()
///     .with_unit(TimeUnit::from_millis(10))
///     .with_join(JoinPolicy::Wait);
///
/// let report = RaceDriver::new(config)
///     .run(|fut| { tokio::spawn(fut); })
///     .await
///     .unwrap();
///
/// println!("final value: {:?}", report.final_value);
/// # };
/// ```
pub struct RaceDriver {
    config: RaceConfig,
    transcript: Transcript,
}

impl RaceDriver {
    pub fn new(config: RaceConfig) -> Self {
        Self {
            config,
            transcript: Transcript::new(),
        }
    }

    /// Record output into `transcript` instead of a private one.
    pub fn with_transcript(mut self, transcript: Transcript) -> Self {
        self.transcript = transcript;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Spawn every task, then either return or wait according to [`RaceConfig::join`].
    ///
    /// # Parameters
    ///
    /// - `spawner`: hands each task to an executor. Tasks sleep on tokio timers, so the
    ///   executor must run inside a tokio runtime, e.g. `|fut| { tokio::spawn(fut); }`. A
    ///   multi-threaded runtime lets the tasks run in parallel.
    ///
    /// # Errors
    ///
    /// - `DemoError::InvalidConfig` if there are no scripts or a pause range is empty.
    /// - `DemoError::TaskPanicked` if a task panicked while the driver was waiting on it.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, spawner)))]
    pub async fn run<S>(&self, spawner: S) -> DemoResult<RaceReport>
    where
        S: Fn(BoxFuture<'static, ()>),
    {
        self.config.validate()?;

        let seed = self.config.seed.unwrap_or_else(random_seed);
        let counter = SharedCounter::new(self.config.initial);

        #[cfg(feature = "tracing")]
        debug!(
            seed,
            initial = self.config.initial,
            tasks = self.config.scripts.len(),
            join = ?self.config.join,
            "starting race"
        );

        self.transcript.say("Start");

        let (done_tx, mut done_rx) = mpsc::unbounded::<(usize, DemoResult<Observation>)>();

        for (index, script) in self.config.scripts.iter().enumerate() {
            let plan = DelayPlan::draw(script, seed, index, self.config.unit)?;

            #[cfg(feature = "tracing")]
            trace!(
                task = script.name(),
                pause_units = plan.total_units(),
                "spawning task"
            );

            let name = script.name();
            let body = run_task(script.clone(), plan, counter.clone(), self.transcript.clone());
            let done_tx = done_tx.clone();

            let task = async move {
                let result = AssertUnwindSafe(body)
                    .catch_unwind()
                    .await
                    .map_err(|payload| DemoError::from_panic(name, payload));

                // Receiver is gone when the driver did not wait
                let _ = done_tx.unbounded_send((index, result));
            };

            spawner(Box::pin(task));
        }

        drop(done_tx);
        self.transcript.say("Behold...");

        if self.config.join == JoinPolicy::Detach {
            #[cfg(feature = "tracing")]
            info!(seed, "tasks detached");

            return Ok(RaceReport {
                seed,
                observations: Vec::new(),
                final_value: None,
                counter,
            });
        }

        let mut finished = Vec::new();
        let mut first_error = None;
        while let Some((index, result)) = done_rx.next().await {
            match result {
                Ok(observation) => finished.push((index, observation)),
                Err(e) if first_error.is_none() => first_error = Some(e),
                Err(_) => {}
            }
        }

        if let Some(err) = first_error {
            #[cfg(feature = "tracing")]
            error!(?err, "race task failed");
            return Err(err);
        }

        finished.sort_by_key(|(index, _)| *index);
        let observations = finished.into_iter().map(|(_, obs)| obs).collect();
        let final_value = counter.get();

        #[cfg(feature = "tracing")]
        info!(seed, final_value, "race finished");

        Ok(RaceReport {
            seed,
            observations,
            final_value: Some(final_value),
            counter,
        })
    }
}

async fn run_task(
    script: TaskScript,
    plan: DelayPlan,
    counter: SharedCounter,
    transcript: Transcript,
) -> Observation {
    for step in plan.steps() {
        match *step {
            PlannedStep::Sleep { duration, .. } => tokio::time::sleep(duration).await,
            PlannedStep::Update(op) => {
                let _stored = counter.apply(op);

                #[cfg(feature = "tracing")]
                trace!(task = script.name(), %op, stored = _stored, "updated counter");
            }
        }
    }

    let observed = counter.get();
    transcript.say(script.report_line(observed));

    Observation {
        task: script.name(),
        expected: script.expected(),
        observed,
    }
}
