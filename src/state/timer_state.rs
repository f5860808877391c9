//! Countdown state machine
//!
//! `TimerState` holds the remaining duration, the run status and the reload
//! snapshot. It has no notion of wall-clock time: whoever owns it calls
//! [`TimerState::tick`] once per interval while it reports `Running`.
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running
//!   ^                |  \
//!   |   reset/reload |   tick reaches 0
//!   +----------------+---------------------> Idle
//! ```

use serde::{Deserialize, Serialize};

use crate::utils::{format_hms, split_hms};

/// Denominator of the hour progress ring
pub const HOUR_RING_MAX: f64 = 12.0;
/// Denominator of the minute and second progress rings
pub const MINUTE_RING_MAX: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

impl TimerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
        }
    }
}

/// Result of a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Countdown is running and needs a tick schedule
    Armed { resumed: bool },
    /// Nothing left to count down; the timer went straight back to idle
    Finished,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second elapsed, keep ticking
    Continue,
    /// Countdown hit zero on this tick
    Expired,
    /// Timer was not running; state untouched
    Stopped,
}

/// Timer state for the countdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    remaining_seconds: u64,
    initial_seconds: Option<u64>,
    status: TimerStatus,
    /// Set by `set_duration`, consumed by the next `start`
    duration_edited: bool,
}

impl TimerState {
    /// Create an idle timer with nothing on the clock
    pub fn new() -> Self {
        Self {
            remaining_seconds: 0,
            initial_seconds: None,
            status: TimerStatus::Idle,
            duration_edited: false,
        }
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// Duration captured by the last start after an edit, if any
    pub fn initial_seconds(&self) -> Option<u64> {
        self.initial_seconds
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Replace the remaining duration. Status is left alone.
    pub fn set_duration(&mut self, hours: u64, minutes: u64, seconds: u64) {
        self.remaining_seconds = hours
            .saturating_mul(3600)
            .saturating_add(minutes.saturating_mul(60))
            .saturating_add(seconds);
        self.duration_edited = true;
    }

    pub fn start(&mut self) -> StartOutcome {
        let resumed = self.status == TimerStatus::Paused && !self.duration_edited;

        if self.duration_edited {
            self.initial_seconds = Some(self.remaining_seconds);
            self.duration_edited = false;
        }

        if self.remaining_seconds == 0 {
            self.status = TimerStatus::Idle;
            return StartOutcome::Finished;
        }

        self.status = TimerStatus::Running;
        StartOutcome::Armed { resumed }
    }

    /// Suspend a running countdown. Returns whether anything changed.
    pub fn pause(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.status = TimerStatus::Paused;
        true
    }

    pub fn reset(&mut self) {
        self.remaining_seconds = 0;
        self.status = TimerStatus::Idle;
    }

    /// Restore the last started duration. Returns false without history.
    pub fn reload(&mut self) -> bool {
        match self.initial_seconds {
            Some(initial) => {
                self.remaining_seconds = initial;
                self.status = TimerStatus::Idle;
                true
            }
            None => false,
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.status != TimerStatus::Running {
            return TickOutcome::Stopped;
        }

        match self.remaining_seconds.checked_sub(1) {
            Some(remaining) => {
                self.remaining_seconds = remaining;
                if remaining == 0 {
                    self.status = TimerStatus::Idle;
                    TickOutcome::Expired
                } else {
                    TickOutcome::Continue
                }
            }
            None => {
                self.status = TimerStatus::Idle;
                TickOutcome::Expired
            }
        }
    }

    /// `HH:MM:SS` of the remaining time
    pub fn format(&self) -> String {
        format_hms(self.remaining_seconds)
    }

    pub fn snapshot(&self) -> Snapshot {
        let (hours, minutes, seconds) = split_hms(self.remaining_seconds);
        Snapshot {
            formatted: self.format(),
            remaining_seconds: self.remaining_seconds,
            hours,
            minutes,
            seconds,
            hour_progress: ring_progress(hours, HOUR_RING_MAX),
            minute_progress: ring_progress(minutes, MINUTE_RING_MAX),
            second_progress: ring_progress(seconds, MINUTE_RING_MAX),
            status: self.status,
            initial_seconds: self.initial_seconds,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

fn ring_progress(value: u64, max: f64) -> f64 {
    (value as f64 / max).clamp(0.0, 1.0)
}

/// Read-only view of the timer handed to front-ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub formatted: String,
    pub remaining_seconds: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub hour_progress: f64,
    pub minute_progress: f64,
    pub second_progress: f64,
    pub status: TimerStatus,
    pub initial_seconds: Option<u64>,
}

impl Default for Snapshot {
    fn default() -> Self {
        TimerState::new().snapshot()
    }
}
