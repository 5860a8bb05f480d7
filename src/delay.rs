//! Seedable pause durations.
//!
//! Every race run has one seed. Each task derives its own generator from that seed and its
//! launch index, then draws all of its pauses up front into a [`DelayPlan`]. Replaying a seed
//! replays the pauses; it does not replay the interleaving, which still belongs to the
//! scheduler.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::DemoResult;
use crate::script::{Step, TaskScript};

/// Wall-clock length of one pause unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnit(Duration);

impl TimeUnit {
    pub const SECOND: TimeUnit = TimeUnit(Duration::from_secs(1));

    pub fn new(unit: Duration) -> Self {
        Self(unit)
    }

    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub fn duration(self) -> Duration {
        self.0
    }

    /// `units` of this unit, saturating instead of overflowing.
    pub fn times(self, units: u32) -> Duration {
        self.0.saturating_mul(units)
    }
}

impl Default for TimeUnit {
    fn default() -> Self {
        Self::SECOND
    }
}

/// A step with its pause already drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedStep {
    Sleep { units: u32, duration: Duration },
    Update(crate::script::Op),
}

/// Concrete steps for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayPlan {
    steps: Vec<PlannedStep>,
}

impl DelayPlan {
    /// Draw every pause of `script` from the generator for (`seed`, `index`).
    ///
    /// # Errors
    ///
    /// Returns `DemoError::InvalidConfig` if a pause range is empty.
    pub fn draw(script: &TaskScript, seed: u64, index: usize, unit: TimeUnit) -> DemoResult<Self> {
        script.validate()?;

        let mut rng = task_rng(seed, index);
        let steps = script
            .steps()
            .iter()
            .map(|step| match step {
                Step::Pause(range) => {
                    let units = rng.gen_range(range.clone());
                    PlannedStep::Sleep {
                        units,
                        duration: unit.times(units),
                    }
                }
                Step::Update(op) => PlannedStep::Update(*op),
            })
            .collect();
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    pub fn total_units(&self) -> u32 {
        self.steps
            .iter()
            .map(|step| match step {
                PlannedStep::Sleep { units, .. } => *units,
                PlannedStep::Update(_) => 0,
            })
            .sum()
    }
}

/// Fresh seed for a run that did not ask for one.
pub fn random_seed() -> u64 {
    rand::random()
}

// Distinct, stable stream per task so adding a task does not shift the others' pauses
fn task_rng(seed: u64, index: usize) -> StdRng {
    let mixed = seed ^ (index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(mixed)
}
