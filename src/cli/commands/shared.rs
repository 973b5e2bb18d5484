//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading, progress bars and the run
//! summary used by the command implementations.

use crate::cli::args::ConvertArgs;
use crate::config::{Config, SeriesMultiplicity};
use crate::Result;
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use tracing::{debug, info};

/// Statistics for one conversion run
#[derive(Debug, Clone, Default)]
pub struct ConversionStats {
    /// Number of ASC files discovered from the inputs
    pub files_discovered: usize,
    /// Number of files parsed into measurements
    pub files_parsed: usize,
    /// Files left out under the skip-malformed policy, with the reason
    pub files_skipped: Vec<(String, String)>,
    /// Rows in the resulting table
    pub rows: usize,
    /// Columns in the resulting table
    pub columns: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the level derived from the CLI flags.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("alv_processor={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using a layered approach (file -> args)
pub fn load_configuration(args: &ConvertArgs) -> Result<Config> {
    info!("Loading configuration");

    let config_file = match &args.config_file {
        Some(path) => Some(path.clone()),
        None => Config::default_config_path()
            .ok()
            .filter(|path| path.exists()),
    };

    let mut config = match &config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            Config::load(path)?
        }
        None => {
            info!("No config file found, using defaults");
            Config::default()
        }
    };

    apply_cli_overrides(&mut config, args);
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
///
/// Flags only ever switch options on; absent flags keep the file values.
pub fn apply_cli_overrides(config: &mut Config, args: &ConvertArgs) {
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if args.skip_malformed {
        config.skip_malformed = true;
    }
    if args.allow_repeated_series {
        config.aggregation.series_multiplicity = SeriesMultiplicity::Uniform;
    }
    if args.column_summaries {
        config.aggregation.include_column_summaries = true;
    }
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print the colored run summary to stderr
pub fn print_summary(stats: &ConversionStats) {
    eprintln!("\n{}", "Conversion Summary".bright_green().bold());
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!(
        "   • Files discovered: {}",
        stats.files_discovered.to_string().bright_white().bold()
    );
    eprintln!(
        "   • Files parsed: {}",
        stats.files_parsed.to_string().bright_white().bold()
    );
    eprintln!(
        "   • Table size: {} rows × {} columns",
        stats.rows.to_string().bright_white().bold(),
        stats.columns.to_string().bright_white().bold()
    );
    eprintln!(
        "   • Processing time: {}",
        HumanDuration(stats.processing_time)
    );

    if !stats.files_skipped.is_empty() {
        eprintln!(
            "\n{} {}",
            "Skipped files:".yellow().bold(),
            stats.files_skipped.len().to_string().bright_red().bold()
        );
        for (name, reason) in &stats.files_skipped {
            eprintln!("   • {}: {}", name, reason);
        }
    }
    eprintln!();
}
