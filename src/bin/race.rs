//! Three tasks race on one counter with no lock.
//!
//! ```bash
//! cargo run --bin race
//! cargo run --bin race -- --seed 42 --unit-ms 100
//! cargo run --bin race -- --daemon
//! RUST_LOG=interleave=trace cargo run --bin race -- --join
//! ```
//!
//! The driver never waits: it prints `Behold...` as soon as the tasks are spawned. The
//! program then holds off exiting until they finish. With `--daemon` it exits at once and the
//! sleeping tasks are cancelled, so most of their output never appears.

use clap::Parser;

use interleave::cli::{init_logging, parallel_runtime, ExitGate, RaceArgs};
use interleave::{DemoResult, RaceDriver, Transcript};

fn main() -> DemoResult<()> {
    let args = RaceArgs::parse();
    init_logging();

    let runtime = parallel_runtime()?;
    let driver = RaceDriver::new(args.config()).with_transcript(Transcript::stdout());
    let gate = ExitGate::new();

    runtime.block_on(async {
        driver.run(|fut| gate.spawn(fut)).await?;

        if args.daemon {
            return Ok(());
        }
        gate.drain().await
    })?;

    // Dropping the runtime cancels any task still sleeping
    Ok(())
}
