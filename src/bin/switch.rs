//! Three coroutines hand control to each other at yields and sleeps.

use clap::Parser;

use interleave::cli::{init_logging, single_thread_runtime, CoopArgs};
use interleave::{coop, DemoResult, Transcript};

fn main() -> DemoResult<()> {
    let args = CoopArgs::parse();
    init_logging();

    let runtime = single_thread_runtime()?;
    runtime.block_on(coop::switch(&Transcript::stdout(), args.common.unit()));
    Ok(())
}
