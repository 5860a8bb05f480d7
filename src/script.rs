//! Task bodies for the race demo.
//!
//! A [`TaskScript`] is a fixed sequence of pauses and counter updates. The three scripts the
//! race demo launches are built by [`TaskScript::increment`], [`TaskScript::multiply`] and
//! [`TaskScript::decrement`]; custom scripts can be assembled with [`TaskScript::new`].

use std::ops::RangeInclusive;

use crate::error::{DemoError, DemoResult};

/// Arithmetic update applied to the shared counter.
///
/// Arithmetic wraps; an update can never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add(i64),
    Mul(i64),
}

impl Op {
    pub fn apply(self, value: i64) -> i64 {
        match self {
            Op::Add(n) => value.wrapping_add(n),
            Op::Mul(n) => value.wrapping_mul(n),
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Add(n) if *n < 0 => write!(f, "-= {}", n.unsigned_abs()),
            Op::Add(n) => write!(f, "+= {}", n),
            Op::Mul(n) => write!(f, "*= {}", n),
        }
    }
}

/// One step of a task body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Sleep for a whole number of time units drawn uniformly from the range
    Pause(RangeInclusive<u32>),
    /// Update the shared counter
    Update(Op),
}

/// Named task body with the value it would report if no other task interfered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskScript {
    name: &'static str,
    expected: i64,
    steps: Vec<Step>,
}

impl TaskScript {
    pub fn new(name: &'static str, expected: i64, steps: Vec<Step>) -> Self {
        Self {
            name,
            expected,
            steps,
        }
    }

    /// Three increments, each after a random pause.
    pub fn increment() -> Self {
        Self::new(
            "increment",
            4,
            vec![
                Step::Pause(1..=3),
                Step::Update(Op::Add(1)),
                Step::Pause(1..=3),
                Step::Update(Op::Add(1)),
                Step::Pause(1..=5),
                Step::Update(Op::Add(1)),
            ],
        )
    }

    /// One doubling after a random pause.
    pub fn multiply() -> Self {
        Self::new(
            "multiply",
            2,
            vec![Step::Pause(0..=3), Step::Update(Op::Mul(2))],
        )
    }

    /// An immediate decrement, a random pause, then another decrement.
    pub fn decrement() -> Self {
        Self::new(
            "decrement",
            -1,
            vec![
                Step::Update(Op::Add(-1)),
                Step::Pause(0..=4),
                Step::Update(Op::Add(-1)),
            ],
        )
    }

    /// The incrementer, multiplier and decrementer, in launch order.
    pub fn defaults() -> Vec<Self> {
        vec![Self::increment(), Self::multiply(), Self::decrement()]
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn expected(&self) -> i64 {
        self.expected
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Counter updates only, in order.
    pub fn ops(&self) -> impl Iterator<Item = Op> + '_ {
        self.steps.iter().filter_map(|step| match step {
            Step::Update(op) => Some(*op),
            Step::Pause(_) => None,
        })
    }

    /// Upper bound on the time units this script spends paused.
    pub fn max_pause_units(&self) -> u32 {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Pause(range) => *range.end(),
                Step::Update(_) => 0,
            })
            .sum()
    }

    /// Reject pause ranges that cannot be sampled.
    pub fn validate(&self) -> DemoResult<()> {
        for step in &self.steps {
            if let Step::Pause(range) = step {
                if range.is_empty() {
                    return Err(DemoError::InvalidConfig {
                        message: format!(
                            "task '{}' has an empty pause range {}..={}",
                            self.name,
                            range.start(),
                            range.end()
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    /// The line a task prints once it is done.
    pub fn report_line(&self, observed: i64) -> String {
        format!("Should be {}, but got {}", self.expected, observed)
    }
}
