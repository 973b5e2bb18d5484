//! Inspect command implementation
//!
//! Parses a single ASC file and prints the extracted measurement record as
//! JSON, which is handy when checking how an export is being read.

use super::shared::{ConversionStats, setup_logging};
use crate::Result;
use crate::app::adapters::filesystem::read_asc_file;
use crate::app::models::MeasurementRecord;
use crate::app::services::asc_parser::AscRecordParser;
use crate::cli::args::InspectArgs;
use std::time::Instant;
use tracing::info;

/// Inspect command runner
pub async fn run_inspect(args: InspectArgs) -> Result<ConversionStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), false)?;

    let record = inspect_file(&args)?;
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(ConversionStats {
        files_discovered: 1,
        files_parsed: 1,
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

fn inspect_file(args: &InspectArgs) -> Result<MeasurementRecord> {
    let source = read_asc_file(&args.file)?;
    let record = AscRecordParser::new().parse(&source.filename, &source.lines)?;

    info!(
        "Parsed {}: sample '{}' at {}",
        source.filename, record.sample_name, record.datetime
    );
    Ok(record)
}
