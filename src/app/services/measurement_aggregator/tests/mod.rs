//! Test helpers for measurement aggregation
//!
//! Records are built directly rather than parsed so that each test states
//! exactly the fields it depends on.

mod aggregator_tests;

use crate::app::models::{MeasurementRecord, SeriesField};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Reference start time T0 used across aggregation tests
pub fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 6, 4)
        .unwrap()
        .and_hms_opt(10, 15, 0)
        .unwrap()
}

/// T0 shifted by a number of seconds
pub fn t0_plus(seconds: i64) -> NaiveDateTime {
    t0() + Duration::seconds(seconds)
}

/// Create a record with no series values
pub fn create_test_record(source_name: &str, datetime: NaiveDateTime) -> MeasurementRecord {
    MeasurementRecord {
        source_name: source_name.to_string(),
        sample_name: "S1".to_string(),
        device_info: Some("ALV-X/rev1".to_string()),
        wavelength_nm: Some(633.0),
        duration_s: 120.0,
        datetime,
        series: SeriesField::ALL
            .into_iter()
            .map(|field| (field, Vec::new()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Create a record carrying a single temperature value
pub fn create_temperature_record(
    source_name: &str,
    datetime: NaiveDateTime,
    temperature: f64,
) -> MeasurementRecord {
    with_series(
        create_test_record(source_name, datetime),
        SeriesField::Temperature,
        vec![temperature],
    )
}

/// Replace one series field's values on a record
pub fn with_series(
    mut record: MeasurementRecord,
    field: SeriesField,
    values: Vec<f64>,
) -> MeasurementRecord {
    record.series.insert(field, values);
    record
}

/// Column tokens for a data key, panicking with context if absent
pub fn column<'a>(table: &'a crate::TableResult, key: &str) -> &'a [String] {
    table
        .data
        .get(key)
        .unwrap_or_else(|| panic!("missing data column '{}'", key))
}
