//! Server-level state wrapped around the timer engine

use std::{sync::Mutex, time::Instant};

use chrono::{DateTime, Utc};

use super::{engine::TimerEngine, timer_state::Snapshot};
use crate::{error::TimerError, utils::format_uptime};

/// Shared state handed to every HTTP handler
#[derive(Debug)]
pub struct AppState {
    /// The single countdown this server drives
    pub engine: TimerEngine,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last intent applied to the engine and when
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    pub fn new(port: u16, host: String) -> Self {
        Self {
            engine: TimerEngine::new(),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    /// Run an engine operation and record it as the last action on success
    pub fn apply<F>(&self, action: &str, operation: F) -> Result<Snapshot, TimerError>
    where
        F: FnOnce(&TimerEngine) -> Result<Snapshot, TimerError>,
    {
        let snapshot = operation(&self.engine)?;

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some((action.to_string(), Utc::now()));
        }

        Ok(snapshot)
    }

    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|last| last.clone()) {
            Some((action, at)) => (Some(action), Some(at)),
            None => (None, None),
        }
    }

    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }
}
