#![deny(missing_docs)]

//! # CDD Inspect CLI
//!
//! Command Line Interface for extracting request annotations from Rust sources.
//!
//! Supported Commands:
//! - `scan`: Reports every annotated operation, section and section field.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

mod error;
mod output;
mod scan;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Request annotation inspector")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract annotation records from Rust files or directories.
    Scan(scan::ScanArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Scan(args) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            scan::execute(args, &mut out)?;
        }
    }

    Ok(())
}
