//! Command-line plumbing shared by the demo binaries.
//!
//! With no flags every binary reproduces its reference behaviour: one-second units, a fresh
//! random seed, and spawned work that nobody joins but that still holds the process open until
//! it finishes, the way non-daemon threads hold an interpreter open at shutdown. `--daemon`
//! lets the process exit over the top of it instead.

use std::sync::Arc;

use clap::{Args, Parser};
use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;

#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

use crate::delay::TimeUnit;
use crate::error::{DemoError, DemoResult};
use crate::race::{JoinPolicy, RaceConfig};

/// Flags every demo accepts.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Length of one sleep unit, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub unit_ms: u64,
}

impl CommonArgs {
    pub fn unit(&self) -> TimeUnit {
        TimeUnit::from_millis(self.unit_ms)
    }
}

/// Race three tasks on one unsynchronized counter.
#[derive(Debug, Parser)]
#[command(name = "race")]
pub struct RaceArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Seed for the random pauses (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Have the driver wait for every task and log the final value
    #[arg(long, conflicts_with = "daemon")]
    pub join: bool,

    /// Exit right after spawning, cancelling tasks that are still asleep
    #[arg(long)]
    pub daemon: bool,
}

impl RaceArgs {
    pub fn config(&self) -> RaceConfig {
        let config = RaceConfig::default()
            .with_unit(self.common.unit())
            .with_join(if self.join {
                JoinPolicy::Wait
            } else {
                JoinPolicy::Detach
            });

        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

/// Spawn a thread that waits, without waiting for it.
#[derive(Debug, Parser)]
#[command(name = "thread")]
pub struct ThreadArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Let the process exit without waiting for the waiter thread
    #[arg(long)]
    pub daemon: bool,
}

/// Cooperative coroutine demo.
#[derive(Debug, Parser)]
pub struct CoopArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Spawner whose tasks the program waits for before it exits.
///
/// Nothing joins a task at the point it is spawned; [`ExitGate::drain`] is the shutdown step
/// that waits for whatever is still running.
#[derive(Debug, Clone, Default)]
pub struct ExitGate {
    handles: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl ExitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn onto the current tokio runtime and remember the task.
    pub fn spawn(&self, fut: BoxFuture<'static, ()>) {
        let handle = tokio::spawn(fut);
        self.handles.lock().push(handle);
    }

    /// Tasks spawned and not yet drained.
    pub fn pending(&self) -> usize {
        self.handles.lock().len()
    }

    /// Wait for every spawned task, including ones spawned while draining.
    ///
    /// # Errors
    ///
    /// Returns `DemoError::TaskPanicked` for the first task that panicked.
    pub async fn drain(&self) -> DemoResult<()> {
        loop {
            let batch = std::mem::take(&mut *self.handles.lock());
            if batch.is_empty() {
                return Ok(());
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(tasks = batch.len(), "waiting for spawned tasks before exit");

            for handle in batch {
                if let Err(err) = handle.await {
                    if err.is_panic() {
                        return Err(DemoError::from_panic("spawned task", err.into_panic()));
                    }
                }
            }
        }
    }
}

/// Install a stderr subscriber filtered by `RUST_LOG`, defaulting to warnings only so stdout
/// carries just the demo output.
pub fn init_logging() {
    #[cfg(feature = "tracing")]
    {
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("interleave=warn")),
            )
            .with_writer(std::io::stderr)
            .try_init();
    }
}

/// Runtime whose worker threads let race tasks run in parallel.
pub fn parallel_runtime() -> DemoResult<Runtime> {
    Ok(Builder::new_multi_thread().enable_time().build()?)
}

/// Runtime that drives everything on the calling thread.
pub fn single_thread_runtime() -> DemoResult<Runtime> {
    Ok(Builder::new_current_thread().enable_time().build()?)
}
