//! Three coroutines switch whenever one has to wait on a readiness poll.

use clap::Parser;

use interleave::cli::{init_logging, single_thread_runtime, CoopArgs};
use interleave::{coop, DemoResult, Transcript};

fn main() -> DemoResult<()> {
    let args = CoopArgs::parse();
    init_logging();

    let runtime = single_thread_runtime()?;
    runtime.block_on(coop::poll(&Transcript::stdout(), args.common.unit()));
    Ok(())
}
