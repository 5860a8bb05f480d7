//! Cooperative switching between coroutines on one thread.
//!
//! Each demo joins three futures and drives them together on the current task. A coroutine
//! only gives up control at an `.await`: an explicit yield, a sleep, or a readiness poll that
//! has to wait. With a single thread, the order of printed lines is fully determined by those
//! suspension points.

use std::time::Duration;

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::delay::TimeUnit;
use crate::transcript::Transcript;

/// Foo yields once, bar sleeps 5 units, baz sleeps 1 unit.
pub async fn switch(transcript: &Transcript, unit: TimeUnit) {
    let foo = async {
        transcript.say("foo is running");
        tokio::task::yield_now().await;
        transcript.say("baz is blocking, switch back to foo...DONE!");
        transcript.say("visiting bar...");
    };

    let bar = async {
        tokio::time::sleep(unit.times(5)).await;
        transcript.say("Finally, bar is DONE!");
    };

    let baz = async {
        transcript.say("context switch from foo to bar, still blocking...jump to baz");
        tokio::time::sleep(unit.times(1)).await;
        transcript.say("visited bar, still blocking, back to baz...DONE!");
        transcript.say("visiting bar again...");
    };

    join_all(vec![foo.boxed_local(), bar.boxed_local(), baz.boxed_local()]).await;
}

/// G1 polls for 5 units, g2 polls for 3 units, g3 sleeps 1 unit.
pub async fn poll(transcript: &Transcript, unit: TimeUnit) {
    let g1 = async {
        transcript.say("g1 starts...");
        poll_nothing(unit.times(5)).await;
        transcript.say("g1 is DONE!");
    };

    let g2 = async {
        transcript.say("enters g2 while waiting for g1 polling");
        poll_nothing(unit.times(3)).await;
        transcript.say("g1 was probably not done, so jump to g2 again");
        transcript.say("g2 is DONE! Only g1 left.");
    };

    let g3 = async {
        transcript.say("hits another polling, switch from g2 to g3");
        tokio::time::sleep(unit.times(1)).await;
        transcript.say("g3 is DONE! Visiting g1...");
    };

    join_all(vec![g1.boxed_local(), g2.boxed_local(), g3.boxed_local()]).await;
}

async fn join_all(coroutines: Vec<LocalBoxFuture<'_, ()>>) {
    #[cfg(feature = "tracing")]
    trace!(count = coroutines.len(), "joining coroutines");

    future::join_all(coroutines).await;
}

// Readiness poll over an empty set of sources: only the timeout can end it
async fn poll_nothing(timeout: Duration) {
    let ready = tokio::time::timeout(timeout, future::pending::<()>()).await;
    debug_assert!(ready.is_err());
}
