mod common;

use std::time::Duration;

use common::Harness;
use ticktimer_client::app::session::TimerEvent;
use ticktimer_shared::{TimerError, TimerState};
use tokio::time::{Instant, sleep};

#[tokio::test(start_paused = true)]
async fn five_second_run_completes_and_sounds_alarm() {
    let mut h = Harness::new(true);
    h.session.set_duration(0, 0, 5).await.unwrap();
    assert_eq!(h.next_update().await.display, "00:00:05");

    let started_at = Instant::now();
    h.session.start().await.unwrap();
    let snap = h.next_update().await;
    assert_eq!(snap.state, TimerState::Running);
    assert_eq!(snap.status, "Timer running...");
    assert_eq!(snap.remaining_secs, 5);

    for left in (0..5).rev() {
        let snap = h.next_update().await;
        assert_eq!(snap.remaining_secs, left);
    }
    assert_eq!(
        h.next_event().await,
        TimerEvent::Completed { alarm: true }
    );
    let elapsed = started_at.elapsed();
    assert!(elapsed >= Duration::from_secs(5) && elapsed < Duration::from_secs(6));

    let snap = h.session.snapshot().await;
    assert_eq!(snap.state, TimerState::Completed);
    assert_eq!(snap.status, "Timer completed!");
    assert_eq!(snap.display, "00:00:00");

    for _ in 0..3 {
        assert_eq!(h.tones.recv().await, Some(1000));
    }
    h.session.shutdown().await;
    assert_eq!(h.platform.completed().len(), 1);
    assert_eq!(h.platform.completed()[0].as_secs(), 5);
}

#[tokio::test(start_paused = true)]
async fn muted_run_completes_without_tones() {
    let mut h = Harness::new(false);
    h.session.set_duration(0, 0, 2).await.unwrap();
    h.session.start().await.unwrap();
    loop {
        if let TimerEvent::Completed { alarm } = h.next_event().await {
            assert!(!alarm);
            break;
        }
    }
    h.session.shutdown().await;
    assert!(h.tones.try_recv().is_err());
    assert_eq!(h.platform.completed().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn alarm_toggle_is_read_at_completion() {
    let mut h = Harness::new(true);
    h.session.set_duration(0, 0, 3).await.unwrap();
    h.session.start().await.unwrap();
    h.session.set_alarm_enabled(false).await;
    loop {
        if let TimerEvent::Completed { alarm } = h.next_event().await {
            assert!(!alarm);
            break;
        }
    }
    h.session.shutdown().await;
    assert!(h.tones.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn pause_stops_ticking_and_start_reloads_duration() {
    let mut h = Harness::new(true);
    h.session.set_duration(0, 1, 0).await.unwrap();
    h.next_update().await;
    h.session.start().await.unwrap();
    h.next_update().await;
    for _ in 0..10 {
        h.next_update().await;
    }

    h.session.pause().await;
    let snap = h.next_update().await;
    assert_eq!(snap.state, TimerState::Paused);
    assert_eq!(snap.status, "Timer paused");
    assert_eq!(snap.remaining_secs, 50);
    assert!(snap.can_start && !snap.can_pause);

    sleep(Duration::from_secs(5)).await;
    h.assert_quiet();
    assert_eq!(h.session.snapshot().await.remaining_secs, 50);

    h.session.start().await.unwrap();
    assert_eq!(h.next_update().await.remaining_secs, 60);
    assert_eq!(h.next_update().await.remaining_secs, 59);
    h.session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn quick_pause_and_restart_keeps_one_tick_per_second() {
    let mut h = Harness::new(true);
    h.session.set_duration(0, 0, 30).await.unwrap();
    h.next_update().await;
    h.session.start().await.unwrap();
    h.next_update().await;
    h.session.pause().await;
    h.next_update().await;
    h.session.start().await.unwrap();
    h.next_update().await;

    let t0 = Instant::now();
    for left in [29, 28, 27] {
        assert_eq!(h.next_update().await.remaining_secs, left);
    }
    let elapsed = t0.elapsed();
    assert!(elapsed >= Duration::from_secs(3) && elapsed < Duration::from_secs(4));
    h.session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn zero_duration_start_is_rejected() {
    let mut h = Harness::new(true);
    let err = h.session.start().await.unwrap_err();
    assert!(matches!(err, TimerError::InvalidInput(_)));
    assert_eq!(h.session.snapshot().await.state, TimerState::Idle);
    sleep(Duration::from_secs(2)).await;
    h.assert_quiet();
}

#[tokio::test(start_paused = true)]
async fn reset_while_running_returns_to_ready() {
    let mut h = Harness::new(true);
    h.session.set_duration(0, 0, 30).await.unwrap();
    h.next_update().await;
    h.session.start().await.unwrap();
    for _ in 0..4 {
        h.next_update().await;
    }

    h.session.reset().await;
    let snap = h.next_update().await;
    assert_eq!(snap.state, TimerState::Idle);
    assert_eq!(snap.status, "Ready");
    assert_eq!(snap.display, "00:00:00");
    assert_eq!(snap.remaining_secs, 0);
    assert!(snap.duration.is_zero());

    sleep(Duration::from_secs(5)).await;
    h.assert_quiet();
    assert_eq!(h.session.snapshot().await.state, TimerState::Idle);
    assert!(h.platform.hidden() >= 2);
}

#[tokio::test(start_paused = true)]
async fn second_start_while_running_is_ignored() {
    let mut h = Harness::new(true);
    h.session.set_duration(0, 0, 10).await.unwrap();
    h.next_update().await;
    h.session.start().await.unwrap();
    h.next_update().await;
    h.session.start().await.unwrap();
    assert_eq!(h.next_update().await.remaining_secs, 9);
    assert_eq!(h.next_update().await.remaining_secs, 8);
    h.session.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn pause_is_never_followed_by_a_running_update() {
    let mut h = Harness::with_interval(true, Duration::from_millis(1));
    h.session.set_duration(1, 0, 0).await.unwrap();
    for _ in 0..50 {
        h.session.start().await.unwrap();
        sleep(Duration::from_millis(3)).await;
        h.session.pause().await;
        sleep(Duration::from_millis(5)).await;

        let last = h.drain().pop();
        match last {
            Some(TimerEvent::Updated(snap)) => assert_eq!(snap.state, TimerState::Paused),
            other => panic!("expected a paused snapshot last, got {other:?}"),
        }
    }
    h.session.shutdown().await;
}
