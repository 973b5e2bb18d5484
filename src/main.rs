use alv_processor::cli::{args::Args, commands};
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Multi-threaded runtime for the blocking parse workers
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Cancellation token observed by the convert command
        let cancellation_token = CancellationToken::new();

        // Ctrl-C cancels the token; a failed handler install waits forever instead
        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C signal handler: {}", e);
                std::future::pending::<()>().await;
            }
            cancellation_token.cancel();
        };

        // Whichever finishes first decides the exit status
        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(alv_processor::Error::processing_interrupted(
                    "Processing interrupted by user",
                ))
            }
        }
    });

    match result {
        // Summary and table output have already been written by the command
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("ALV Processor - Dynamic Light Scattering Table Converter");
    println!("========================================================");
    println!();
    println!("Merge a series of ALV correlator ASC exports into a single");
    println!("laboratory notebook table ordered by acquisition time.");
    println!();
    println!("USAGE:");
    println!("    alv-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    convert     Convert ASC files into one aggregated table");
    println!("    inspect     Parse a single ASC file and print the record");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Convert every ASC file in a directory to JSON:");
    println!("    alv-processor convert measurements/");
    println!();
    println!("    # Write a CSV table, skipping files that fail to parse:");
    println!("    alv-processor convert 'runs/*.asc' -f csv -o table.csv --skip-malformed");
    println!();
    println!("    # Show what is read from one file:");
    println!("    alv-processor inspect runs/sample_0001.ASC");
    println!();
    println!("For detailed help on any command, use:");
    println!("    alv-processor <COMMAND> --help");
}
