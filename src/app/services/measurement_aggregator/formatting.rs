//! Rendering of numbers and timestamps as table tokens
//!
//! Table values are text. Numbers are written fixed-point with the shortest
//! representation that round-trips, never in scientific notation and without
//! locale separators.

use chrono::{NaiveDateTime, Timelike};

use crate::constants::{SERIES_ENTRY_SEPARATOR, START_TIME_OUTPUT_FORMAT};

/// Render a number as a fixed-point token
pub fn format_number(value: f64) -> String {
    // `{}` on f64 never switches to exponent notation; only -0 needs folding
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

/// Render one measurement's entries for a series field as a single token
pub fn format_series_token(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| format_number(*value))
        .collect::<Vec<_>>()
        .join(SERIES_ENTRY_SEPARATOR)
}

/// Render a timestamp, appending fractional seconds only when present
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    if timestamp.nanosecond() == 0 {
        timestamp.format(START_TIME_OUTPUT_FORMAT).to_string()
    } else {
        timestamp
            .format(&format!("{}%.f", START_TIME_OUTPUT_FORMAT))
            .to_string()
    }
}

/// Seconds elapsed from `baseline` to `timestamp`, at millisecond precision
pub fn elapsed_seconds(baseline: NaiveDateTime, timestamp: NaiveDateTime) -> f64 {
    (timestamp - baseline).num_milliseconds() as f64 / 1000.0
}
