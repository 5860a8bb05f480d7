//! The shared counter the race tasks fight over.
//!
//! There is deliberately no lock here. The value lives in an atomic cell only so that
//! concurrent access stays memory-safe; every update is a separate load and store with
//! relaxed ordering, so two tasks updating at the same moment can overwrite each other.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::script::Op;

/// Reference-counted handle to one unsynchronized integer.
///
/// Clones share the same cell. Reads and writes are individually atomic, but
/// [`SharedCounter::apply`] is not: it loads, computes, then stores.
///
/// # Examples
///
/// ```
/// use interleave::{Op, SharedCounter};
///
/// let counter = SharedCounter::new(1);
/// let other = counter.clone();
///
/// counter.apply(Op::Add(1));
/// other.apply(Op::Mul(2));
///
/// assert_eq!(counter.get(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct SharedCounter {
    cell: Arc<AtomicI64>,
}

impl SharedCounter {
    pub fn new(initial: i64) -> Self {
        Self {
            cell: Arc::new(AtomicI64::new(initial)),
        }
    }

    /// Current value.
    pub fn get(&self) -> i64 {
        self.cell.load(Ordering::Relaxed)
    }

    /// Overwrite the value.
    pub fn set(&self, value: i64) {
        self.cell.store(value, Ordering::Relaxed);
    }

    /// Read-modify-write without any synchronization between the read and the write.
    ///
    /// Returns the value this call stored, which is not necessarily the value the counter
    /// holds by the time the caller looks again.
    pub fn apply(&self, op: Op) -> i64 {
        let seen = self.get();
        let next = op.apply(seen);
        self.set(next);
        next
    }

    /// Number of live handles, including this one.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.cell)
    }
}
