//! Which final counter values an interleaving could produce.
//!
//! The race demo cannot promise a value, but it can promise the value comes from *some*
//! interleaving of the tasks' updates that keeps each task's own updates in order. This module
//! enumerates those interleavings exhaustively; the state space for the default scripts is tiny.

use std::collections::{BTreeSet, HashSet};

use crate::script::{Op, TaskScript};

/// How finely updates from different tasks may interleave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Each update happens at once
    Atomic,
    /// Each update is a load followed by a store; other tasks may run in between
    LoadStore,
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct State {
    pcs: Vec<usize>,
    value: i64,
    // Value loaded by a task that has not stored yet
    loaded: Vec<Option<i64>>,
}

/// Every final value reachable from `initial` by interleaving `scripts`.
pub fn reachable_values(
    initial: i64,
    scripts: &[TaskScript],
    granularity: Granularity,
) -> BTreeSet<i64> {
    let programs: Vec<Vec<Op>> = scripts.iter().map(|s| s.ops().collect()).collect();

    let start = State {
        pcs: vec![0; programs.len()],
        value: initial,
        loaded: vec![None; programs.len()],
    };

    let mut finals = BTreeSet::new();
    let mut seen = HashSet::new();
    let mut stack = vec![start];

    while let Some(state) = stack.pop() {
        if !seen.insert(state.clone()) {
            continue;
        }

        let mut advanced = false;
        for (task, program) in programs.iter().enumerate() {
            let pc = state.pcs[task];
            if pc == program.len() {
                continue;
            }
            advanced = true;
            let op = program[pc];

            let mut next = state.clone();
            match (granularity, state.loaded[task]) {
                (Granularity::Atomic, _) => {
                    next.value = op.apply(state.value);
                    next.pcs[task] += 1;
                }
                (Granularity::LoadStore, None) => {
                    next.loaded[task] = Some(state.value);
                }
                (Granularity::LoadStore, Some(seen_value)) => {
                    next.value = op.apply(seen_value);
                    next.loaded[task] = None;
                    next.pcs[task] += 1;
                }
            }
            stack.push(next);
        }

        if !advanced {
            finals.insert(state.value);
        }
    }

    finals
}

/// Value after running `scripts` one after another, in slice order.
pub fn serial_value(initial: i64, scripts: &[TaskScript]) -> i64 {
    scripts
        .iter()
        .flat_map(|s| s.ops())
        .fold(initial, |value, op| op.apply(value))
}

/// Values over every ordering of whole scripts.
pub fn serial_values(initial: i64, scripts: &[TaskScript]) -> BTreeSet<i64> {
    let mut order: Vec<usize> = (0..scripts.len()).collect();
    let mut values = BTreeSet::new();
    permute(&mut order, 0, &mut |order| {
        let ordered: Vec<TaskScript> = order.iter().map(|&i| scripts[i].clone()).collect();
        values.insert(serial_value(initial, &ordered));
    });
    values
}

fn permute(items: &mut [usize], k: usize, visit: &mut impl FnMut(&[usize])) {
    if k == items.len() {
        visit(items);
        return;
    }
    for i in k..items.len() {
        items.swap(k, i);
        permute(items, k + 1, visit);
        items.swap(k, i);
    }
}
