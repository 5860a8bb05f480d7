//! Thread and coroutine demos through the public API

use interleave::{coop, detached, TimeUnit, Transcript};

#[test]
fn test_thread_demo_joined() {
    let transcript = Transcript::new();
    detached::launch(&transcript, TimeUnit::from_millis(1))
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(
        transcript.lines(),
        ["Start process", "Life goes on", "Done waiting"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_switch_foo_finishes_before_any_sleep_ends() {
    let transcript = Transcript::new();
    coop::switch(&transcript, TimeUnit::SECOND).await;

    let foo_done = transcript
        .position("baz is blocking, switch back to foo...DONE!")
        .unwrap();
    let baz_done = transcript
        .position("visited bar, still blocking, back to baz...DONE!")
        .unwrap();
    let bar_done = transcript.position("Finally, bar is DONE!").unwrap();

    assert!(foo_done < baz_done);
    assert!(baz_done < bar_done);
    assert_eq!(bar_done, transcript.len() - 1);
}

#[tokio::test(start_paused = true)]
async fn test_poll_shortest_wait_finishes_first() {
    let transcript = Transcript::new();
    coop::poll(&transcript, TimeUnit::SECOND).await;

    let g3 = transcript.position("g3 is DONE! Visiting g1...").unwrap();
    let g2 = transcript.position("g2 is DONE! Only g1 left.").unwrap();
    let g1 = transcript.position("g1 is DONE!").unwrap();

    // Every coroutine starts before any finishes
    assert_eq!(g3, 3);
    assert!(g3 < g2 && g2 < g1);
}

#[test]
fn test_demos_on_single_thread_runtime() {
    let runtime = interleave::cli::single_thread_runtime().unwrap();
    let transcript = Transcript::new();

    runtime.block_on(async {
        coop::switch(&transcript, TimeUnit::from_millis(1)).await;
        coop::poll(&transcript, TimeUnit::from_millis(1)).await;
    });

    assert_eq!(transcript.len(), 14);
}
