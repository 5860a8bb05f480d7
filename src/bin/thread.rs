//! Spawn a thread and move on without it.
//!
//! ```bash
//! cargo run --bin thread
//! cargo run --bin thread -- --daemon
//! ```
//!
//! `main` never joins the waiter. The process still waits for it on the way out, unless
//! `--daemon` lets the exit kill it mid-sleep.

use clap::Parser;

use interleave::cli::{init_logging, ThreadArgs};
use interleave::detached::{self, Lingering};
use interleave::{DemoResult, Transcript};

fn main() -> DemoResult<()> {
    let args = ThreadArgs::parse();
    init_logging();

    let lingering = Lingering::new();
    run(&args, &lingering)?;

    lingering.join_all()
}

fn run(args: &ThreadArgs, lingering: &Lingering) -> DemoResult<()> {
    let waiter = detached::launch(&Transcript::stdout(), args.common.unit())?;

    if !args.daemon {
        lingering.keep(waiter);
    }
    Ok(())
}
