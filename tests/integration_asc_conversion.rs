//! Integration tests for the ASC conversion pipeline
//!
//! Writes Latin-1 encoded ALV exports into a temporary directory and runs
//! discovery, concurrent parsing, aggregation and table export end to end.

use alv_processor::app::adapters::filesystem::discover_asc_files;
use alv_processor::app::services::conversion::AscConverter;
use alv_processor::app::services::table_export::Table;
use alv_processor::config::Config;
use alv_processor::{Error, SeriesField};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Latin-1 bytes of a native ALV export: separate Date/Time lines, tab
/// separators and `°`/`µ`/`²` in the labels
fn native_export(time: &str, temperature: &str, radius: &str) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"ALV-7004 CGS-8F Data\r\n");
    bytes.extend_from_slice(format!("Date :\t\"04.06.2021\"\r\nTime :\t\"{}\"\r\n", time).as_bytes());
    bytes.extend_from_slice(b"Samplename : \t\"PS latex 100nm\"\r\n");
    bytes.extend_from_slice(b"Device Info : \"ALV-CGS3/Compact/v2\"\r\n");
    bytes.extend_from_slice(format!("Temperature [K] :\t{}\r\n", temperature).as_bytes());
    bytes.extend_from_slice(b"Viscosity [cp]  :\t0.89\r\n");
    bytes.extend_from_slice(b"Refractive Index:\t1.332\r\n");
    bytes.extend_from_slice(b"Wavelength [nm] :\t632.8\r\n");
    bytes.extend_from_slice(b"Angle [\xb0]       :\t90\r\n");
    bytes.extend_from_slice(b"Duration [s]    :\t60\r\n");
    bytes.extend_from_slice(b"Diffusion Coefficient 2. order fit [\xb5m\xb2/s] : 4.21\r\n");
    bytes.extend_from_slice(b"Expansion Parameter \xb52 : 0.035\r\n");
    bytes.extend_from_slice(format!("Hydrodynamic Radius 2. order fit [nm] : {}\r\n", radius).as_bytes());
    bytes.extend_from_slice(b"\"Correlation\"\r\n  1.25000E-004\t  1.69477E+000\r\n");
    bytes
}

fn write_export(dir: &Path, name: &str, time: &str, temperature: &str, radius: &str) {
    fs::write(dir.join(name), native_export(time, temperature, radius)).unwrap();
}

#[tokio::test]
async fn test_directory_converts_to_time_ordered_table() {
    let dir = TempDir::new().unwrap();
    // File names deliberately out of acquisition order
    write_export(dir.path(), "sample_0003.ASC", "10:25:00", "298.55", "52.4");
    write_export(dir.path(), "sample_0001.ASC", "10:15:00", "298.15", "51.9");
    write_export(dir.path(), "sample_0002.ASC", "10:20:00.5", "298.35", "52.1");
    fs::write(dir.path().join("notes.txt"), "not an export").unwrap();

    let files = discover_asc_files(&[dir.path().to_path_buf()]).unwrap();
    assert_eq!(files.len(), 3);

    let converter = AscConverter::new(Config::default().with_workers(2));
    let outcome = converter.convert_files(&files, None).await.unwrap();
    assert_eq!(outcome.files_parsed, 3);

    let result = &outcome.table;
    assert_eq!(result.metadata.get("Samplename").unwrap(), "PS latex 100nm");
    assert_eq!(result.metadata.get("Device Info").unwrap(), "ALV-CGS3");
    assert_eq!(result.metadata.get("wavelength [nm]").unwrap(), "632.8");
    assert_eq!(
        result.metadata.get("measurement starting time").unwrap(),
        "2021-06-04 10:15:00"
    );
    assert_eq!(result.metadata.get("duration [s]").unwrap(), "60");
    assert_eq!(result.metadata.get("rows").unwrap(), "3");
    assert_eq!(result.metadata.get("columns").unwrap(), "8");

    assert_eq!(
        result.data.get("duration [s]").unwrap(),
        &vec!["0".to_string(), "300.5".to_string(), "600".to_string()]
    );
    assert_eq!(
        result.data.get(SeriesField::Temperature.column_name()).unwrap(),
        &vec![
            "298.15".to_string(),
            "298.35".to_string(),
            "298.55".to_string()
        ]
    );
    assert_eq!(
        result
            .data
            .get(SeriesField::DiffusionCoefficient.column_name())
            .unwrap(),
        &vec!["4.21".to_string(); 3]
    );
    assert_eq!(
        result
            .data
            .get(SeriesField::ExpansionParameter.column_name())
            .unwrap(),
        &vec!["0.035".to_string(); 3]
    );

    let table = Table::from_result(result);
    assert_eq!(table.columns.len(), 8);
    assert_eq!(table.columns[0].key, "0");
    assert_eq!(table.columns[0].name, "duration [s]");
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[1][0], "300.5");

    let mut csv = Vec::new();
    table.write_csv(&mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert!(csv.starts_with("duration [s],refractive index,temperature [K]"));
    assert_eq!(csv.lines().count(), 4);
}

#[tokio::test]
async fn test_malformed_export_policy() {
    let dir = TempDir::new().unwrap();
    write_export(dir.path(), "a.asc", "10:15:00", "298.15", "51.9");
    fs::write(dir.path().join("b.asc"), b"Samplename : \"S1\"\r\nDuration [s] : 60\r\n").unwrap();

    let files = discover_asc_files(&[dir.path().to_path_buf()]).unwrap();

    let strict = AscConverter::new(Config::default());
    match strict.convert_files(&files, None).await {
        Err(Error::MalformedRecord { file, .. }) => assert_eq!(file, "b.asc"),
        other => panic!("expected MalformedRecord, got {:?}", other),
    }

    let lenient = AscConverter::new(Config::default().with_skip_malformed(true));
    let outcome = lenient.convert_files(&files, None).await.unwrap();
    assert_eq!(outcome.files_parsed, 1);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.table.metadata.get("rows").unwrap(), "1");
}

#[tokio::test]
async fn test_no_exports_is_empty_input() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("readme.txt"), "nothing here").unwrap();

    let files = discover_asc_files(&[dir.path().to_path_buf()]).unwrap();
    assert!(files.is_empty());

    let converter = AscConverter::new(Config::default());
    assert!(matches!(
        converter.convert_files(&files, None).await,
        Err(Error::EmptyInput)
    ));
}
