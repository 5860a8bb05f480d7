//! Ordered record of the lines a demo prints.

use std::sync::Arc;

use parking_lot::Mutex;

/// Thread-safe line sink shared by every task of a demo.
///
/// With echo enabled (the binaries) each line is also written to stdout as it is recorded.
/// Tests usually keep echo off and inspect [`Transcript::lines`] afterwards.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Arc<Mutex<Vec<String>>>,
    echo: bool,
}

impl Transcript {
    /// Record lines without printing them.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record lines and print each one to stdout.
    pub fn stdout() -> Self {
        Self {
            lines: Arc::default(),
            echo: true,
        }
    }

    pub fn say(&self, line: impl Into<String>) {
        let line = line.into();
        // Print under the lock so stdout order matches recorded order
        let mut lines = self.lines.lock();
        if self.echo {
            println!("{line}");
        }
        lines.push(line);
    }

    /// Snapshot of everything recorded so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Position of the first line equal to `line`.
    pub fn position(&self, line: &str) -> Option<usize> {
        self.lines.lock().iter().position(|l| l == line)
    }
}
