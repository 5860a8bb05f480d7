//! Fire-and-forget OS thread.
//!
//! The caller keeps going while a spawned thread sleeps. If the caller's process exits first,
//! the thread dies with it and never prints, unless it was handed to a [`Lingering`] set that
//! the process drains on its way out.

use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::delay::TimeUnit;
use crate::error::{DemoError, DemoResult};
use crate::transcript::Transcript;

/// Units the waiter thread sleeps.
pub const WAIT_UNITS: u32 = 5;

const WAITER_NAME: &str = "waiter";

/// Handle to a spawned waiter thread.
///
/// Dropping it detaches the thread.
#[derive(Debug)]
pub struct Detached {
    handle: JoinHandle<()>,
}

impl Detached {
    /// Block until the thread finishes.
    ///
    /// # Errors
    ///
    /// Returns `DemoError::TaskPanicked` if the thread panicked.
    pub fn join(self) -> DemoResult<()> {
        self.handle
            .join()
            .map_err(|payload| DemoError::from_panic(WAITER_NAME, payload))
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Threads the process waits for before it exits.
///
/// Handing a thread over does not join it; [`Lingering::join_all`] does, at shutdown.
#[derive(Debug, Default)]
pub struct Lingering {
    threads: Mutex<Vec<Detached>>,
}

impl Lingering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep(&self, thread: Detached) {
        self.threads.lock().push(thread);
    }

    pub fn len(&self) -> usize {
        self.threads.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.lock().is_empty()
    }

    /// Join every kept thread.
    ///
    /// # Errors
    ///
    /// Returns the first `DemoError::TaskPanicked`, after joining the rest.
    pub fn join_all(&self) -> DemoResult<()> {
        let threads = std::mem::take(&mut *self.threads.lock());

        #[cfg(feature = "tracing")]
        debug!(threads = threads.len(), "waiting for lingering threads");

        let mut first_error = None;
        for thread in threads {
            if let Err(err) = thread.join() {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Print, spawn a thread that waits [`WAIT_UNITS`] units before printing, print again.
///
/// # Errors
///
/// Returns `DemoError::Runtime` if the OS refuses to spawn the thread.
pub fn launch(transcript: &Transcript, unit: TimeUnit) -> DemoResult<Detached> {
    transcript.say("Start process");

    let wait = unit.times(WAIT_UNITS);
    let thread_transcript = transcript.clone();
    let handle = thread::Builder::new()
        .name(WAITER_NAME.to_string())
        .spawn(move || {
            #[cfg(feature = "tracing")]
            trace!(?wait, "waiter sleeping");

            thread::sleep(wait);
            thread_transcript.say("Done waiting");
        })?;

    #[cfg(feature = "tracing")]
    debug!(?wait, "waiter thread spawned");

    transcript.say("Life goes on");
    Ok(Detached { handle })
}
