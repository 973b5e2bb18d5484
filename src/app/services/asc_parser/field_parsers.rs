//! Field parsing utilities for ALV ASC files
//!
//! This module provides helper functions for splitting ASC lines into
//! label/value pairs and converting values to typed fields with errors that
//! name the offending file and field.

use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

use crate::constants::{DATE_FORMATS, DATETIME_FORMATS, TIME_FORMAT};

/// `label : value` or `label<TAB>value`; the label ends at the first `:` or tab
static FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([^:\t]*[^:\t\s])\s*[:\t]\s*(.*?)\s*$").expect("field line pattern is valid")
});

/// Split an ASC line into a trimmed label and an unquoted value
///
/// Returns `None` for lines without a label separator (section headings,
/// blank lines, bare correlation data).
pub fn split_field_line(line: &str) -> Option<(&str, &str)> {
    let captures = FIELD_LINE.captures(line)?;
    let label = captures.get(1)?.as_str();
    let value = captures.get(2).map_or("", |m| m.as_str());
    Some((label, unquote(value)))
}

/// Remove one level of surrounding double quotes
pub fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse a finite floating-point value
pub fn parse_number(file: &str, field: &str, value: &str) -> Result<f64> {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        Ok(_) => Err(Error::malformed_record(
            file,
            field,
            format!("has non-finite number '{}'", trimmed),
        )),
        Err(e) => Err(Error::malformed_record(
            file,
            field,
            format!("has invalid number '{}' ({})", trimmed, e),
        )),
    }
}

/// Parse a combined date and time value
pub fn parse_datetime(file: &str, field: &str, value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            Error::malformed_record(
                file,
                field,
                format!(
                    "has invalid timestamp '{}' (expected 'DD.MM.YYYY HH:MM:SS' or 'YYYY-MM-DD HH:MM:SS')",
                    trimmed
                ),
            )
        })
}

/// Parse a date-only value
pub fn parse_date(file: &str, field: &str, value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            Error::malformed_record(
                file,
                field,
                format!(
                    "has invalid date '{}' (expected 'DD.MM.YYYY' or 'YYYY-MM-DD')",
                    trimmed
                ),
            )
        })
}

/// Parse a time-of-day value
pub fn parse_time(file: &str, field: &str, value: &str) -> Result<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT).map_err(|e| {
        Error::malformed_record(
            file,
            field,
            format!("has invalid time '{}' ({})", trimmed, e),
        )
    })
}
