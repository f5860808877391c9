//! H/M/S field parsing, range checks and drag stepping

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Longest text a single field accepts
const MAX_FIELD_DIGITS: usize = 2;

/// One of the three duration entry fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeField {
    Hours,
    Minutes,
    Seconds,
}

impl TimeField {
    /// Largest value the field accepts; also the progress ring denominator
    pub fn max(self) -> u64 {
        match self {
            TimeField::Hours => 12,
            TimeField::Minutes | TimeField::Seconds => 60,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeField::Hours => "hours",
            TimeField::Minutes => "minutes",
            TimeField::Seconds => "seconds",
        }
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeField {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hours" | "hour" | "h" => Ok(TimeField::Hours),
            "minutes" | "minute" | "m" => Ok(TimeField::Minutes),
            "seconds" | "second" | "s" => Ok(TimeField::Seconds),
            _ => Err(InputError::UnknownField(s.to_string())),
        }
    }
}

/// Drag direction for one stepping notch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Validated field values ready for `TimerEngine::set_duration`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldValues {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl FieldValues {
    pub fn total_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
    }
}

/// Parse the text of a single field. Blank text counts as zero.
pub fn parse_field(field: TimeField, text: &str) -> Result<u64, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    if text.chars().count() > MAX_FIELD_DIGITS {
        return Err(InputError::TooLong {
            field,
            text: text.to_string(),
        });
    }
    if !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(InputError::NotANumber {
            field,
            text: text.to_string(),
        });
    }

    let value: u64 = text.parse().map_err(|_| InputError::NotANumber {
        field,
        text: text.to_string(),
    })?;
    if value > field.max() {
        return Err(InputError::OutOfRange {
            field,
            value,
            max: field.max(),
        });
    }
    Ok(value)
}

/// Parse all three fields, stopping at the first rejection
pub fn parse_duration(hours: &str, minutes: &str, seconds: &str) -> Result<FieldValues, InputError> {
    Ok(FieldValues {
        hours: parse_field(TimeField::Hours, hours)?,
        minutes: parse_field(TimeField::Minutes, minutes)?,
        seconds: parse_field(TimeField::Seconds, seconds)?,
    })
}

/// Apply one drag notch to a field value, staying inside `0..=max`
pub fn step(field: TimeField, value: u64, direction: Direction) -> u64 {
    match direction {
        Direction::Up if value < field.max() => value + 1,
        Direction::Down if value > 0 => value - 1,
        _ => value.min(field.max()),
    }
}

/// Two-digit zero-padded field text
pub fn field_text(value: u64) -> String {
    format!("{:02}", value)
}

/// How full the field's ring is
pub fn field_progress(field: TimeField, value: u64) -> f64 {
    (value as f64 / field.max() as f64).clamp(0.0, 1.0)
}
