//! Countdown Server - A countdown timer engine with a local HTTP adapter
//!
//! The engine converts user-entered hours, minutes and seconds into a
//! countdown, ticks it down once per second, and publishes formatted time and
//! progress-ring fractions to whichever front-end is listening.

pub mod api;
pub mod config;
pub mod error;
pub mod input;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{InputError, TimerError};
pub use state::{AppState, Snapshot, TimerEngine, TimerEvent, TimerStatus};
pub use utils::signals::shutdown_signal;
