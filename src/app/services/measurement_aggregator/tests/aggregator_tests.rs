//! Tests for ordering, baseline derivation and column derivation

use super::*;
use crate::Error;
use crate::app::models::SeriesField;
use crate::app::services::measurement_aggregator::{MeasurementAggregator, aggregate_records};
use crate::config::{AggregationConfig, SeriesMultiplicity};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_two_file_scenario() {
    let file_a = create_temperature_record("a.asc", t0(), 298.1);
    let file_b = create_temperature_record("b.asc", t0_plus(300), 298.3);

    let table = aggregate_records(vec![file_b, file_a]).unwrap();

    assert_eq!(table.metadata.get("Samplename").unwrap(), "S1");
    assert_eq!(
        table.metadata.get("measurement starting time").unwrap(),
        "2021-06-04 10:15:00"
    );
    assert_eq!(table.metadata.get("Device Info").unwrap(), "ALV-X");
    assert_eq!(table.metadata.get("wavelength [nm]").unwrap(), "633");
    assert_eq!(table.metadata.get("duration [s]").unwrap(), "120");
    assert_eq!(table.metadata.get("rows").unwrap(), "2");
    assert_eq!(
        column(&table, "temperature [K]"),
        strings(&["298.1", "298.3"]).as_slice()
    );
    assert_eq!(
        column(&table, "duration [s]"),
        strings(&["0", "300"]).as_slice()
    );
}

#[test]
fn test_output_key_order() {
    let table = aggregate_records(vec![create_test_record("a.asc", t0())]).unwrap();

    assert_eq!(
        table.metadata.keys().collect::<Vec<_>>(),
        vec![
            "Samplename",
            "Device Info",
            "wavelength [nm]",
            "measurement starting time",
            "duration [s]",
            "rows",
            "columns",
        ]
    );

    let mut expected_columns = vec!["duration [s]"];
    expected_columns.extend(SeriesField::ALL.iter().map(|field| field.column_name()));
    assert_eq!(table.data.keys().collect::<Vec<_>>(), expected_columns);
}

#[test]
fn test_records_sorted_by_datetime() {
    let records = vec![
        create_temperature_record("c.asc", t0_plus(600), 3.0),
        create_temperature_record("a.asc", t0(), 1.0),
        create_temperature_record("b.asc", t0_plus(60), 2.0),
    ];
    let table = aggregate_records(records).unwrap();

    assert_eq!(
        column(&table, "temperature [K]"),
        strings(&["1", "2", "3"]).as_slice()
    );
    assert_eq!(
        column(&table, "duration [s]"),
        strings(&["0", "60", "600"]).as_slice()
    );
}

#[test]
fn test_metadata_taken_from_earliest_record() {
    let mut late = create_test_record("late.asc", t0_plus(30));
    late.sample_name = "Late".to_string();
    late.duration_s = 5.0;
    let mut early = create_test_record("early.asc", t0());
    early.sample_name = "Early".to_string();
    early.device_info = Some("ALV-CGS3/Compact/v2".to_string());

    let table = aggregate_records(vec![late, early]).unwrap();

    assert_eq!(table.metadata.get("Samplename").unwrap(), "Early");
    assert_eq!(table.metadata.get("Device Info").unwrap(), "ALV-CGS3");
    assert_eq!(table.metadata.get("duration [s]").unwrap(), "120");
}

#[test]
fn test_identical_timestamps_keep_input_order() {
    let records = vec![
        create_temperature_record("first.asc", t0_plus(10), 10.0),
        create_temperature_record("second.asc", t0_plus(10), 20.0),
        create_temperature_record("start.asc", t0(), 0.5),
        create_temperature_record("third.asc", t0_plus(10), 30.0),
    ];
    let table = aggregate_records(records).unwrap();

    assert_eq!(
        column(&table, "temperature [K]"),
        strings(&["0.5", "10", "20", "30"]).as_slice()
    );
    assert_eq!(
        column(&table, "duration [s]"),
        strings(&["0", "10", "10", "10"]).as_slice()
    );
}

#[test]
fn test_baseline_is_zero_for_single_record() {
    let table = aggregate_records(vec![create_test_record("only.asc", t0_plus(42))]).unwrap();

    assert_eq!(column(&table, "duration [s]"), strings(&["0"]).as_slice());
    assert_eq!(
        table.metadata.get("measurement starting time").unwrap(),
        "2021-06-04 10:15:42"
    );
}

#[test]
fn test_row_and_column_counts_match_data() {
    let records = (0..5)
        .map(|i| create_temperature_record(&format!("{}.asc", i), t0_plus(i * 90), 298.0))
        .collect();
    let table = aggregate_records(records).unwrap();

    let rows: usize = table.metadata.get("rows").unwrap().parse().unwrap();
    let columns: usize = table.metadata.get("columns").unwrap().parse().unwrap();

    assert_eq!(rows, 5);
    assert_eq!(columns, table.data.len());
    assert_eq!(columns, SeriesField::ALL.len() + 1);
    assert!(table.data.values().all(|column| column.len() == rows));
    assert_eq!(table.row_count(), rows);
    assert_eq!(table.column_count(), columns);
}

#[test]
fn test_empty_input_fails() {
    assert!(matches!(aggregate_records(Vec::new()), Err(Error::EmptyInput)));
}

#[test]
fn test_missing_series_field_yields_empty_tokens() {
    let records = vec![
        create_test_record("a.asc", t0()),
        create_test_record("b.asc", t0_plus(1)),
    ];
    let table = aggregate_records(records).unwrap();

    assert_eq!(
        column(&table, "hydrodynamic radius [nm]"),
        strings(&["", ""]).as_slice()
    );
}

#[test]
fn test_missing_optional_scalars_render_empty() {
    let mut record = create_test_record("bare.asc", t0());
    record.device_info = None;
    record.wavelength_nm = None;

    let table = aggregate_records(vec![record]).unwrap();

    assert_eq!(table.metadata.get("Device Info").unwrap(), "");
    assert_eq!(table.metadata.get("wavelength [nm]").unwrap(), "");
}

fn uniform_aggregator() -> MeasurementAggregator {
    MeasurementAggregator::new(AggregationConfig {
        series_multiplicity: SeriesMultiplicity::Uniform,
        include_column_summaries: false,
    })
}

#[test]
fn test_repeated_series_lines_rejected_by_default() {
    let records = vec![
        with_series(
            create_test_record("b.asc", t0_plus(300)),
            SeriesField::DetectionAngle,
            vec![30.0, 90.0],
        ),
        with_series(
            create_test_record("a.asc", t0()),
            SeriesField::DetectionAngle,
            vec![30.0, 90.0],
        ),
    ];

    match aggregate_records(records) {
        Err(Error::InconsistentSeriesLength {
            field,
            file,
            expected,
            found,
        }) => {
            assert_eq!(field, "Angle [°]");
            assert_eq!(file, "a.asc");
            assert_eq!(expected, 1);
            assert_eq!(found, 2);
        }
        other => panic!("expected InconsistentSeriesLength, got {:?}", other),
    }
}

#[test]
fn test_single_values_accepted_by_default() {
    let records = vec![
        create_temperature_record("a.asc", t0(), 298.1),
        create_temperature_record("b.asc", t0_plus(300), 298.3),
    ];

    assert!(aggregate_records(records).is_ok());
}

#[test]
fn test_uniform_multi_angle_series_joined_per_record() {
    let records = vec![
        with_series(
            create_test_record("a.asc", t0()),
            SeriesField::DetectionAngle,
            vec![30.0, 90.0, 150.0],
        ),
        with_series(
            create_test_record("b.asc", t0_plus(120)),
            SeriesField::DetectionAngle,
            vec![30.0, 90.0, 150.0],
        ),
    ];
    let table = uniform_aggregator().aggregate(records).unwrap();

    assert_eq!(
        column(&table, "detection angle [degrees]"),
        strings(&["30; 90; 150", "30; 90; 150"]).as_slice()
    );
}

#[test]
fn test_uniform_inconsistent_series_length_is_surfaced() {
    let records = vec![
        with_series(
            create_test_record("three.asc", t0()),
            SeriesField::DetectionAngle,
            vec![30.0, 90.0, 150.0],
        ),
        with_series(
            create_test_record("five.asc", t0_plus(60)),
            SeriesField::DetectionAngle,
            vec![30.0, 60.0, 90.0, 120.0, 150.0],
        ),
    ];

    match uniform_aggregator().aggregate(records) {
        Err(Error::InconsistentSeriesLength {
            field,
            file,
            expected,
            found,
        }) => {
            assert_eq!(field, "Angle [°]");
            assert_eq!(file, "five.asc");
            assert_eq!(expected, 3);
            assert_eq!(found, 5);
        }
        other => panic!("expected InconsistentSeriesLength, got {:?}", other),
    }
}

#[test]
fn test_series_present_in_only_some_records_is_inconsistent() {
    let records = vec![
        create_temperature_record("a.asc", t0(), 298.1),
        create_test_record("b.asc", t0_plus(60)),
    ];

    assert!(matches!(
        aggregate_records(records),
        Err(Error::InconsistentSeriesLength { expected: 1, found: 0, .. })
    ));
}

#[test]
fn test_column_summaries_in_metadata() {
    let aggregator = MeasurementAggregator::new(AggregationConfig {
        series_multiplicity: SeriesMultiplicity::Uniform,
        include_column_summaries: true,
    });
    let records = vec![
        create_temperature_record("a.asc", t0(), 298.1),
        create_temperature_record("b.asc", t0_plus(300), 298.3),
    ];
    let table = aggregator.aggregate(records).unwrap();

    assert_eq!(
        table.metadata.get("temperature [K]").unwrap(),
        "298.1, 298.3"
    );
    assert_eq!(table.metadata.get("duration [s]").unwrap(), "120");

    let keys: Vec<&str> = table.metadata.keys().collect();
    assert_eq!(keys.len(), 7 + SeriesField::ALL.len());
    assert_eq!(&keys[keys.len() - 3..], &["duration [s]", "rows", "columns"]);
}

#[test]
fn test_fractional_offsets() {
    let records = vec![
        create_test_record("a.asc", t0()),
        create_test_record(
            "b.asc",
            t0() + chrono::Duration::milliseconds(1500),
        ),
    ];
    let table = aggregate_records(records).unwrap();

    assert_eq!(
        column(&table, "duration [s]"),
        strings(&["0", "1.5"]).as_slice()
    );
}
