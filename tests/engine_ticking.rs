use std::time::Duration;

use countdown_server::{input::FieldValues, TimerEngine, TimerError, TimerEvent, TimerStatus};
use tokio::time::sleep;

fn remaining(engine: &TimerEngine) -> u64 {
    engine.snapshot().unwrap().remaining_seconds
}

fn status(engine: &TimerEngine) -> TimerStatus {
    engine.snapshot().unwrap().status
}

#[tokio::test(start_paused = true)]
async fn test_counts_down_once_per_second() {
    let engine = TimerEngine::new();
    engine.set_duration(0, 0, 5).unwrap();
    engine.start().unwrap();

    sleep(Duration::from_millis(500)).await;
    assert_eq!(remaining(&engine), 5, "first tick waits a full interval");

    sleep(Duration::from_millis(2000)).await;
    assert_eq!(remaining(&engine), 3);
    assert_eq!(engine.format().unwrap(), "00:00:03");
    assert_eq!(status(&engine), TimerStatus::Running);
}

#[tokio::test(start_paused = true)]
async fn test_expires_after_exactly_n_ticks() {
    let engine = TimerEngine::new();
    let mut events = engine.events();
    engine.set_duration(0, 0, 3).unwrap();
    engine.start().unwrap();

    sleep(Duration::from_millis(3500)).await;
    let snapshot = engine.snapshot().unwrap();
    assert_eq!(snapshot.remaining_seconds, 0);
    assert_eq!(snapshot.status, TimerStatus::Idle);
    assert_eq!(snapshot.formatted, "00:00:00");

    assert!(matches!(events.recv().await, Ok(TimerEvent::DurationSet { seconds: 3, .. })));
    assert!(matches!(events.recv().await, Ok(TimerEvent::Started { seconds: 3, .. })));
    assert!(matches!(events.recv().await, Ok(TimerEvent::Expired { .. })));

    // Nothing keeps ticking after expiry
    sleep(Duration::from_secs(5)).await;
    assert_eq!(remaining(&engine), 0);
}

#[tokio::test(start_paused = true)]
async fn test_reload_round_trip_stops_ticking() {
    let engine = TimerEngine::new();
    engine.set_duration(0, 0, 5).unwrap();
    engine.start().unwrap();

    sleep(Duration::from_millis(2500)).await;
    assert_eq!(remaining(&engine), 3);

    let snapshot = engine.reload().unwrap();
    assert_eq!(snapshot.remaining_seconds, 5);
    assert_eq!(snapshot.status, TimerStatus::Idle);

    sleep(Duration::from_secs(3)).await;
    assert_eq!(remaining(&engine), 5, "no stale tick after reload");
}

#[tokio::test(start_paused = true)]
async fn test_reset_then_reload_restores_hour() {
    let engine = TimerEngine::new();
    engine.set_duration(1, 0, 0).unwrap();
    engine.start().unwrap();

    let snapshot = engine.reset().unwrap();
    assert_eq!(snapshot.remaining_seconds, 0);
    assert_eq!(snapshot.status, TimerStatus::Idle);

    let snapshot = engine.reload().unwrap();
    assert_eq!(snapshot.remaining_seconds, 3600);
    assert_eq!(snapshot.formatted, "01:00:00");
    assert_eq!(snapshot.hour_progress, 1.0 / 12.0);
}

#[tokio::test(start_paused = true)]
async fn test_pause_freezes_and_resume_continues() {
    let engine = TimerEngine::new();
    engine.set_duration(0, 0, 10).unwrap();
    engine.start().unwrap();

    sleep(Duration::from_millis(1500)).await;
    let paused = engine.pause().unwrap();
    assert_eq!(paused.remaining_seconds, 9);
    assert_eq!(paused.status, TimerStatus::Paused);

    sleep(Duration::from_secs(5)).await;
    assert_eq!(engine.pause().unwrap(), paused, "second pause changes nothing");

    let resumed = engine.start().unwrap();
    assert_eq!(resumed.status, TimerStatus::Running);
    assert_eq!(resumed.initial_seconds, Some(10));

    sleep(Duration::from_millis(1500)).await;
    assert_eq!(remaining(&engine), 8);
}

#[tokio::test(start_paused = true)]
async fn test_restart_rearms_the_schedule() {
    let engine = TimerEngine::new();
    engine.set_duration(0, 0, 10).unwrap();
    engine.start().unwrap();

    sleep(Duration::from_millis(1500)).await;
    assert_eq!(remaining(&engine), 9);

    engine.start().unwrap();
    sleep(Duration::from_millis(800)).await;
    assert_eq!(remaining(&engine), 9, "old schedule must not fire");

    sleep(Duration::from_millis(400)).await;
    assert_eq!(remaining(&engine), 8);
}

#[tokio::test(start_paused = true)]
async fn test_zero_duration_start_is_immediately_idle() {
    let engine = TimerEngine::new();
    engine.set_duration(0, 0, 0).unwrap();
    let snapshot = engine.start().unwrap();

    assert_eq!(snapshot.status, TimerStatus::Idle);
    assert_eq!(snapshot.formatted, "00:00:00");
    assert_eq!(snapshot.initial_seconds, Some(0));

    sleep(Duration::from_secs(2)).await;
    assert_eq!(status(&engine), TimerStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_reload_without_history_is_noop() {
    let engine = TimerEngine::new();
    engine.set_duration(0, 2, 0).unwrap();

    let snapshot = engine.reload().unwrap();
    assert_eq!(snapshot.remaining_seconds, 120);
    assert_eq!(snapshot.initial_seconds, None);
}

#[tokio::test(start_paused = true)]
async fn test_watchers_receive_every_tick() {
    let engine = TimerEngine::new();
    let mut rx = engine.subscribe();
    engine.set_duration(0, 1, 30).unwrap();
    engine.start().unwrap();
    rx.borrow_and_update();

    rx.changed().await.unwrap();
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.formatted, "00:01:29");
    assert_eq!(snapshot.minute_progress, 1.0 / 60.0);
    assert_eq!(snapshot.second_progress, 29.0 / 60.0);

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().remaining_seconds, 88);
}

#[tokio::test(start_paused = true)]
async fn test_every_transition_is_broadcast() {
    let engine = TimerEngine::new();
    let mut events = engine.events();

    engine.set_duration(0, 0, 10).unwrap();
    engine.start().unwrap();
    sleep(Duration::from_millis(1500)).await;
    engine.pause().unwrap();
    engine.start().unwrap();
    engine.reset().unwrap();
    engine.reload().unwrap();

    assert!(matches!(events.recv().await, Ok(TimerEvent::DurationSet { seconds: 10, .. })));
    assert!(matches!(events.recv().await, Ok(TimerEvent::Started { seconds: 10, .. })));
    assert!(matches!(events.recv().await, Ok(TimerEvent::Paused { seconds: 9, .. })));
    assert!(matches!(events.recv().await, Ok(TimerEvent::Resumed { seconds: 9, .. })));
    assert!(matches!(events.recv().await, Ok(TimerEvent::Reset { .. })));
    assert!(matches!(events.recv().await, Ok(TimerEvent::Reloaded { seconds: 10, .. })));
    assert!(events.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_locked_fields_refuse_edits_while_running() {
    let engine = TimerEngine::new();
    let values = FieldValues {
        hours: 0,
        minutes: 1,
        seconds: 0,
    };
    engine.set_fields_if_editable(values).unwrap();
    engine.start().unwrap();

    let edit = FieldValues {
        hours: 0,
        minutes: 0,
        seconds: 5,
    };
    assert!(matches!(
        engine.set_fields_if_editable(edit),
        Err(TimerError::FieldsLocked)
    ));
    assert_eq!(remaining(&engine), 60);

    engine.pause().unwrap();
    let snapshot = engine.set_fields_if_editable(edit).unwrap();
    assert_eq!(snapshot.remaining_seconds, 5);
    assert_eq!(snapshot.status, TimerStatus::Paused);
}
