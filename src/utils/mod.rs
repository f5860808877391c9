//! Utility functions module
//!
//! Clock formatting and process signal helpers shared by the engine and the
//! binary.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::{format_hms, format_uptime, split_hms};
pub use signals::shutdown_signal;
