//! Command-line argument definitions for the ALV processor
//!
//! Defines the CLI interface using the clap derive API.

use crate::constants::MAX_WORKERS;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the ALV light scattering converter
///
/// Merges a series of ALV correlator ASC exports into a single
/// laboratory notebook table.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "alv-processor",
    version,
    about = "Merge ALV dynamic light scattering ASC exports into one notebook table",
    long_about = "Parses ASC files written by ALV correlator software, orders the measurements \
                  by acquisition time and merges them into a single table with elapsed-time, \
                  temperature, viscosity, angle, diffusion coefficient, cumulant and \
                  hydrodynamic radius columns."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert a series of ASC files into one aggregated table
    Convert(ConvertArgs),
    /// Parse a single ASC file and print the extracted record
    Inspect(InspectArgs),
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// ASC files, directories (searched recursively) or glob patterns
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file for the table
    ///
    /// If not specified, the table is written to stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file for the table (default: stdout)"
    )]
    pub output_file: Option<PathBuf>,

    /// Output format for the table
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "json",
        help = "Output format for the table"
    )]
    pub output_format: OutputFormat,

    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// alv-processor/config.json in the user configuration directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Number of files parsed concurrently
    #[arg(
        short = 'w',
        long = "workers",
        value_name = "COUNT",
        help = "Number of parallel parse workers (default: CPU count)"
    )]
    pub workers: Option<usize>,

    /// Skip files that fail to parse
    ///
    /// By default a single malformed file aborts the conversion. With this
    /// flag the file is reported and left out of the table.
    #[arg(long = "skip-malformed", help = "Skip malformed files instead of aborting")]
    pub skip_malformed: bool,

    /// Accept repeated series lines within one file
    ///
    /// Multi-angle exports repeat lines such as `Angle [°]`. With this flag
    /// the entries are joined into one cell, provided every file repeats
    /// them the same number of times.
    #[arg(
        long = "allow-repeated-series",
        help = "Accept repeated series lines (e.g. multi-angle exports)"
    )]
    pub allow_repeated_series: bool,

    /// Copy each joined series column into the table metadata
    #[arg(
        long = "column-summaries",
        help = "Include joined series columns in the table metadata"
    )]
    pub column_summaries: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Also hides the progress bar.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// ASC file to parse
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format for the converted table
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Notebook table as pretty-printed JSON
    Json,
    /// Column names and rows as CSV
    Csv,
    /// Colored summary for terminal display
    Human,
}

impl ConvertArgs {
    /// Validate the convert command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(Error::configuration(
                    "Number of workers must be greater than 0",
                ));
            }
            if workers > MAX_WORKERS {
                return Err(Error::configuration(format!(
                    "Number of workers cannot exceed {}",
                    MAX_WORKERS
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output file directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            log_level_for(self.verbose)
        }
    }

    /// Check if we should show progress bars
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl InspectArgs {
    pub fn get_log_level(&self) -> &'static str {
        log_level_for(self.verbose)
    }
}

fn log_level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
