//! refgen CLI - type declarations from HTML API reference docs
//!
//! This is the main entry point for the refgen command-line interface.

use anyhow::Result;
use clap::Parser;

use refgen_cli::cli::Cli;
use refgen_cli::logging::initialize_logging;
use refgen_cli::run::{execute, print_summary, resolve_config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    let config = resolve_config(&cli)?;
    let report = execute(&config).await?;
    print_summary(&report, &config.output.path, cli.json, cli.quiet)?;

    Ok(())
}
