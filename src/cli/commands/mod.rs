//! Command implementations for the ALV processor CLI
//!
//! Each command lives in its own module:
//! - `convert`: merge ASC files into one table
//! - `inspect`: parse and print a single ASC file

pub mod convert;
pub mod inspect;
pub mod shared;

pub use shared::ConversionStats;

use crate::Result;
use crate::cli::args::{Args, Commands};
use tokio_util::sync::CancellationToken;

/// Dispatch to the subcommand handler selected on the command line
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<ConversionStats> {
    match args.command {
        Some(Commands::Convert(convert_args)) => {
            convert::run_convert(convert_args, cancellation_token).await
        }
        Some(Commands::Inspect(inspect_args)) => inspect::run_inspect(inspect_args).await,
        None => Err(crate::Error::configuration("No command given")),
    }
}
