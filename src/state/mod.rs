//! State management module
//!
//! The countdown state machine, the engine that schedules it, and the
//! server-level state wrapped around the engine.

pub mod app_state;
pub mod engine;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use engine::{TimerEngine, TimerEvent};
pub use timer_state::{Snapshot, TimerState, TimerStatus};
