//! Escape disambiguation timing tests.
//!
//! The decoder itself is time-free; the run loop arms a grace timer when a
//! lone escape byte arrives. These tests replay that protocol against
//! tokio's paused clock to pin the timing contract: nothing fires before
//! the grace period, exactly one Back fires after it, and a continuation
//! arriving in time wins instead.

use std::time::Duration;

use daoscope::ui::input::{Decoded, Decoder, KeyAction, ESCAPE_GRACE};

#[tokio::test(start_paused = true)]
async fn lone_escape_resolves_to_back_only_after_the_grace_period() {
    let mut decoder = Decoder::default();
    assert_eq!(decoder.feed(&[0x1b]), Decoded::AwaitEscape);

    let timer = tokio::time::sleep(ESCAPE_GRACE);
    tokio::pin!(timer);

    // Just before the deadline the timer must still be pending.
    let early = tokio::time::timeout(ESCAPE_GRACE - Duration::from_millis(1), &mut timer).await;
    assert!(early.is_err(), "timer fired before the grace period");
    assert!(decoder.escape_pending());

    timer.await;
    assert_eq!(decoder.timeout(), Some(KeyAction::Back));
    // Exactly once per pending escape.
    assert_eq!(decoder.timeout(), None);
}

#[tokio::test(start_paused = true)]
async fn continuation_inside_the_grace_period_beats_the_timer() {
    let mut decoder = Decoder::default();
    assert_eq!(decoder.feed(&[0x1b]), Decoded::AwaitEscape);

    // The rest of an arrow sequence lands well inside the window.
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(decoder.feed(b"[A"), Decoded::Action(KeyAction::LineUp));
    assert!(!decoder.escape_pending());

    // The (cancelled) deadline passing later produces nothing.
    tokio::time::sleep(ESCAPE_GRACE).await;
    assert_eq!(decoder.timeout(), None);
}

#[tokio::test(start_paused = true)]
async fn each_escape_in_a_double_press_gets_its_own_window() {
    let mut decoder = Decoder::default();
    assert_eq!(decoder.feed(&[0x1b]), Decoded::AwaitEscape);

    tokio::time::sleep(Duration::from_millis(20)).await;
    // The second escape resolves the first immediately and re-arms.
    assert_eq!(decoder.feed(&[0x1b]), Decoded::Action(KeyAction::Back));
    assert!(decoder.escape_pending());

    tokio::time::sleep(ESCAPE_GRACE).await;
    assert_eq!(decoder.timeout(), Some(KeyAction::Back));
}
