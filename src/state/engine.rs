//! Timer engine: the countdown state plus its tick schedule and notifications

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use super::timer_state::{Snapshot, StartOutcome, TickOutcome, TimerState};
use crate::{error::TimerError, input::FieldValues, tasks::spawn_ticker};

/// Discrete timer transitions published to event subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    DurationSet { seconds: u64, at: DateTime<Utc> },
    Started { seconds: u64, at: DateTime<Utc> },
    Resumed { seconds: u64, at: DateTime<Utc> },
    Paused { seconds: u64, at: DateTime<Utc> },
    Reset { at: DateTime<Utc> },
    Reloaded { seconds: u64, at: DateTime<Utc> },
    Expired { at: DateTime<Utc> },
}

/// Everything guarded by the engine lock
#[derive(Debug)]
struct Inner {
    timer: TimerState,
    /// Identifies the armed tick schedule; bumped on every arm and cancel
    generation: u64,
    ticker: Option<JoinHandle<()>>,
}

impl Inner {
    /// Invalidate the current schedule and stop its task
    fn cancel_ticker(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

/// State shared between the engine handle and its tick task
#[derive(Debug)]
pub(crate) struct Shared {
    inner: Mutex<Inner>,
    snapshot_tx: watch::Sender<Snapshot>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<Snapshot>,
    event_tx: broadcast::Sender<TimerEvent>,
}

impl Shared {
    fn lock(&self) -> Result<MutexGuard<'_, Inner>, TimerError> {
        self.inner.lock().map_err(|_| TimerError::StatePoisoned)
    }

    fn publish(&self, snapshot: &Snapshot) {
        if let Err(e) = self.snapshot_tx.send(snapshot.clone()) {
            warn!("Failed to send timer snapshot: {}", e);
        }
    }

    fn emit(&self, event: TimerEvent) {
        // No subscribers is the normal case
        if self.event_tx.send(event).is_err() {
            debug!("No timer event subscribers");
        }
    }

    /// Apply one tick for the schedule `generation`.
    ///
    /// Returns `false` once the schedule should stop, either because the
    /// countdown expired or because the schedule was cancelled meanwhile.
    pub(crate) fn tick(&self, generation: u64) -> Result<bool, TimerError> {
        let mut inner = self.lock()?;
        if inner.generation != generation {
            debug!("Discarding tick from cancelled schedule {}", generation);
            return Ok(false);
        }

        let outcome = inner.timer.tick();
        let snapshot = inner.timer.snapshot();
        match outcome {
            TickOutcome::Continue => {
                debug!("Tick: {} remaining", snapshot.formatted);
                self.publish(&snapshot);
                Ok(true)
            }
            TickOutcome::Expired => {
                info!("Countdown expired");
                inner.ticker = None;
                inner.generation = inner.generation.wrapping_add(1);
                self.publish(&snapshot);
                self.emit(TimerEvent::Expired { at: Utc::now() });
                Ok(false)
            }
            TickOutcome::Stopped => Ok(false),
        }
    }
}

/// Countdown engine owning one timer and, while running, one tick task.
///
/// All operations are serialized through a single lock that also guards the
/// tick schedule, so a pause, reset or reload can never be followed by a tick
/// from the schedule it cancelled. `start` must be called inside a tokio
/// runtime.
#[derive(Debug)]
pub struct TimerEngine {
    shared: Arc<Shared>,
}

impl TimerEngine {
    /// Create an idle engine with nothing on the clock
    pub fn new() -> Self {
        let initial = TimerState::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(initial.snapshot());
        let (event_tx, _) = broadcast::channel(64);

        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    timer: initial,
                    generation: 0,
                    ticker: None,
                }),
                snapshot_tx,
                _snapshot_rx: snapshot_rx,
                event_tx,
            }),
        }
    }

    /// Current snapshot, read directly from the timer
    pub fn snapshot(&self) -> Result<Snapshot, TimerError> {
        Ok(self.shared.lock()?.timer.snapshot())
    }

    /// `HH:MM:SS` of the remaining time
    pub fn format(&self) -> Result<String, TimerError> {
        Ok(self.shared.lock()?.timer.format())
    }

    /// Watch channel that receives a snapshot after every operation and tick
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Broadcast channel of discrete transitions
    pub fn events(&self) -> broadcast::Receiver<TimerEvent> {
        self.shared.event_tx.subscribe()
    }

    pub fn set_duration(&self, hours: u64, minutes: u64, seconds: u64) -> Result<Snapshot, TimerError> {
        let mut inner = self.shared.lock()?;
        Ok(self.apply_duration(&mut inner, hours, minutes, seconds))
    }

    /// Convenience wrapper for already validated field values
    pub fn set_fields(&self, values: FieldValues) -> Result<Snapshot, TimerError> {
        self.set_duration(values.hours, values.minutes, values.seconds)
    }

    /// Like `set_fields`, but refused with `FieldsLocked` while running.
    /// The status check and the edit happen under one lock.
    pub fn set_fields_if_editable(&self, values: FieldValues) -> Result<Snapshot, TimerError> {
        let mut inner = self.shared.lock()?;
        if inner.timer.is_running() {
            return Err(TimerError::FieldsLocked);
        }
        Ok(self.apply_duration(&mut inner, values.hours, values.minutes, values.seconds))
    }

    fn apply_duration(&self, inner: &mut Inner, hours: u64, minutes: u64, seconds: u64) -> Snapshot {
        inner.timer.set_duration(hours, minutes, seconds);
        let snapshot = inner.timer.snapshot();

        info!("Duration set to {}", snapshot.formatted);
        self.shared.publish(&snapshot);
        self.shared.emit(TimerEvent::DurationSet {
            seconds: snapshot.remaining_seconds,
            at: Utc::now(),
        });
        snapshot
    }

    /// Start or resume the countdown. Restarting a running timer re-arms
    /// its tick schedule.
    pub fn start(&self) -> Result<Snapshot, TimerError> {
        let mut inner = self.shared.lock()?;
        inner.cancel_ticker();

        let outcome = inner.timer.start();
        let snapshot = inner.timer.snapshot();
        let seconds = snapshot.remaining_seconds;
        match outcome {
            StartOutcome::Armed { resumed } => {
                let generation = inner.generation;
                inner.ticker = Some(spawn_ticker(Arc::clone(&self.shared), generation));
                self.shared.publish(&snapshot);
                if resumed {
                    info!("Countdown resumed at {}", snapshot.formatted);
                    self.shared.emit(TimerEvent::Resumed { seconds, at: Utc::now() });
                } else {
                    info!("Countdown started at {}", snapshot.formatted);
                    self.shared.emit(TimerEvent::Started { seconds, at: Utc::now() });
                }
            }
            StartOutcome::Finished => {
                info!("Start requested with nothing on the clock");
                self.shared.publish(&snapshot);
                self.shared.emit(TimerEvent::Expired { at: Utc::now() });
            }
        }
        Ok(snapshot)
    }

    pub fn pause(&self) -> Result<Snapshot, TimerError> {
        let mut inner = self.shared.lock()?;
        if !inner.timer.pause() {
            debug!("Pause ignored, timer is {}", inner.timer.status().as_str());
            return Ok(inner.timer.snapshot());
        }
        inner.cancel_ticker();

        let snapshot = inner.timer.snapshot();
        info!("Countdown paused at {}", snapshot.formatted);
        self.shared.publish(&snapshot);
        self.shared.emit(TimerEvent::Paused {
            seconds: snapshot.remaining_seconds,
            at: Utc::now(),
        });
        Ok(snapshot)
    }

    pub fn reset(&self) -> Result<Snapshot, TimerError> {
        let mut inner = self.shared.lock()?;
        inner.cancel_ticker();
        inner.timer.reset();

        let snapshot = inner.timer.snapshot();
        info!("Countdown reset");
        self.shared.publish(&snapshot);
        self.shared.emit(TimerEvent::Reset { at: Utc::now() });
        Ok(snapshot)
    }

    /// Restore the last started duration; a no-op before the first start
    pub fn reload(&self) -> Result<Snapshot, TimerError> {
        let mut inner = self.shared.lock()?;
        if inner.timer.initial_seconds().is_none() {
            debug!("Reload ignored, timer was never started");
            return Ok(inner.timer.snapshot());
        }
        inner.cancel_ticker();
        inner.timer.reload();

        let snapshot = inner.timer.snapshot();
        info!("Countdown reloaded to {}", snapshot.formatted);
        self.shared.publish(&snapshot);
        self.shared.emit(TimerEvent::Reloaded {
            seconds: snapshot.remaining_seconds,
            at: Utc::now(),
        });
        Ok(snapshot)
    }

    /// Stop the tick task without touching the countdown
    pub fn shutdown(&self) {
        match self.shared.inner.lock() {
            Ok(mut inner) => inner.cancel_ticker(),
            Err(poisoned) => poisoned.into_inner().cancel_ticker(),
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
