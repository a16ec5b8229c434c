//! The generation command: configuration, pipeline wiring and summary.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use refgen_core::{
    Config, FileEmitter, HttpSource, Pipeline, PipelineOptions, RunReport, SleepThrottle,
};
use tracing::{debug, info};

use crate::cli::Cli;

/// Resolve the effective configuration: file, environment, then flags.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_to(&mut config);
    config.validate().context("Invalid configuration")?;
    debug!(?config, "resolved configuration");
    Ok(config)
}

/// Run the pipeline against the configured site.
pub async fn execute(config: &Config) -> Result<RunReport> {
    let source = HttpSource::with_options(
        &config.source.base_url,
        config.timeout(),
        &config.source.user_agent,
    )
    .with_context(|| format!("Failed to create HTTP client for {}", config.source.base_url))?;

    let emitter = FileEmitter::new(&config.output.path, config.output.format);
    let mut pipeline = Pipeline::new(
        source,
        SleepThrottle(config.throttle()),
        emitter,
        PipelineOptions::from(config),
    )
    .with_progress(|done, total, name| info!("[{done}/{total}] {name}"));

    pipeline
        .run()
        .await
        .context("Declaration generation failed")
}

/// Print the run summary on stdout.
pub fn print_summary(report: &RunReport, output: &Path, json: bool, quiet: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    if quiet {
        return Ok(());
    }

    println!(
        "{} Generated {} services ({} declarations, {} options types)",
        "✓".green(),
        report.services.len().to_string().bold(),
        report.total_members(),
        report.total_options_types()
    );
    for service in &report.services {
        let skipped = if service.skipped.is_empty() {
            String::new()
        } else {
            format!(", {} skipped", service.skipped.len())
                .yellow()
                .to_string()
        };
        println!(
            "  {} {} members{}",
            service.name.cyan(),
            service.members,
            skipped
        );
    }
    println!("Wrote {}", output.display().to_string().bold());
    Ok(())
}
