//! Field input module
//!
//! Validation and drag-stepping for the hours/minutes/seconds text fields a
//! front-end collects before handing a duration to the engine.

pub mod field;

// Re-export main types
pub use field::{
    field_progress, field_text, parse_duration, parse_field, step, Direction, FieldValues,
    TimeField,
};
