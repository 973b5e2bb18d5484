//! Convert command implementation
//!
//! Discovers ASC files, parses them concurrently, aggregates the measurements
//! and writes the resulting table in the requested format.

use super::shared::{
    ConversionStats, create_progress_bar, load_configuration, print_summary, setup_logging,
};
use crate::app::adapters::filesystem::discover_asc_files;
use crate::app::services::conversion::AscConverter;
use crate::app::services::table_export::Table;
use crate::cli::args::{ConvertArgs, OutputFormat};
use crate::{Error, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Convert command runner
///
/// 1. Set up logging and configuration
/// 2. Discover ASC files from the inputs
/// 3. Parse and aggregate with progress reporting
/// 4. Write the table and print the summary
pub async fn run_convert(
    args: ConvertArgs,
    cancellation_token: CancellationToken,
) -> Result<ConversionStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting ALV conversion");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let files = discover_asc_files(&args.inputs)?;
    if files.is_empty() {
        return Err(Error::EmptyInput);
    }

    let progress = args
        .show_progress()
        .then(|| create_progress_bar(files.len() as u64, "Parsing ASC files"));

    let converter = AscConverter::new(config);
    let outcome = tokio::select! {
        outcome = converter.convert_files(&files, progress.as_ref()) => outcome,
        _ = cancellation_token.cancelled() => {
            return Err(Error::processing_interrupted("Conversion cancelled"));
        }
    };

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    let outcome = outcome?;

    let table = Table::from_result(&outcome.table);
    write_table(&table, &args)?;

    let stats = ConversionStats {
        files_discovered: files.len(),
        files_parsed: outcome.files_parsed,
        files_skipped: outcome.skipped,
        rows: outcome.table.row_count(),
        columns: outcome.table.column_count(),
        processing_time: start_time.elapsed(),
    };

    if !args.quiet {
        print_summary(&stats);
    }

    Ok(stats)
}

/// Write the table to the output file or stdout
fn write_table(table: &Table, args: &ConvertArgs) -> Result<()> {
    match &args.output_file {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::io(format!("Failed to create {}", path.display()), e)
            })?;
            let mut writer = BufWriter::new(file);
            render_table(table, args.output_format, &mut writer)?;
            writer.flush()?;
            info!("Wrote table to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            render_table(table, args.output_format, &mut writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

/// Render the table in the given format
pub fn render_table<W: Write>(table: &Table, format: OutputFormat, writer: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = table.to_json()?;
            writeln!(writer, "{}", json)?;
        }
        OutputFormat::Csv => table.write_csv(&mut *writer)?,
        OutputFormat::Human => render_human(table, writer)?,
    }
    Ok(())
}

/// Metadata as `key: value` lines followed by the rows in aligned columns
fn render_human<W: Write>(table: &Table, writer: &mut W) -> Result<()> {
    for (key, value) in table.metadata.iter() {
        writeln!(writer, "{}: {}", key, value)?;
    }
    writeln!(writer)?;

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(column.name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    write_aligned(writer, &header, &widths)?;
    for row in &table.rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        write_aligned(writer, &cells, &widths)?;
    }
    Ok(())
}

fn write_aligned<W: Write>(writer: &mut W, cells: &[&str], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(writer, "{}", line.trim_end())
}
