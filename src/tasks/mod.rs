//! Background tasks module
//!
//! This module contains the tick loop that drives a running countdown.

pub mod ticker;

// Re-export main functions
pub(crate) use ticker::spawn_ticker;
pub use ticker::TICK_INTERVAL;
