//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use refgen_core::{Config, OutputFormat};

/// Generate ambient type declarations from an HTML API reference site.
///
/// Walks the root listing, every service page and every member detail page,
/// then writes one declaration file with a namespace per service.
#[derive(Parser, Clone, Debug)]
#[command(name = "refgen", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file. Also via `REFGEN_CONFIG`.
    #[arg(long, value_name = "FILE", env = "REFGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Documentation host every link is resolved against
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Path of the root listing page
    #[arg(long, value_name = "PATH")]
    pub root_path: Option<String>,

    /// Output file
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Process at most N services
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Process only services whose path contains FILTER
    #[arg(long = "service", value_name = "FILTER")]
    pub service: Option<String>,

    /// Pause after each service, in milliseconds
    #[arg(long, value_name = "MS")]
    pub throttle_ms: Option<u64>,

    /// Name of the ambient root namespace
    #[arg(long, value_name = "NAME")]
    pub root_namespace: Option<String>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Enable debug logging (same level as --verbose)
    #[arg(long)]
    pub debug: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color")]
    pub no_color: bool,
}

/// `--format` values.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    /// Ambient declaration text
    Dts,
    /// JSON namespace tree
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Dts => Self::Dts,
            FormatArg::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Override `config` with every flag that was given.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.source.base_url.clone_from(base_url);
        }
        if let Some(root_path) = &self.root_path {
            config.source.root_path.clone_from(root_path);
        }
        if let Some(output) = &self.output {
            config.output.path.clone_from(output);
        }
        if let Some(format) = self.format {
            config.output.format = format.into();
        }
        if let Some(limit) = self.limit {
            config.run.limit = Some(limit);
        }
        if let Some(service) = &self.service {
            config.run.filter = Some(service.clone());
        }
        if let Some(throttle_ms) = self.throttle_ms {
            config.run.throttle_ms = throttle_ms;
        }
        if let Some(root_namespace) = &self.root_namespace {
            config.run.root_namespace.clone_from(root_namespace);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "refgen",
            "--base-url",
            "http://localhost:9000",
            "-o",
            "out/types.d.ts",
            "--format",
            "json",
            "--limit",
            "3",
            "--service",
            "sheet",
            "--throttle-ms",
            "0",
            "--root-namespace",
            "Scripts",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply_to(&mut config);

        assert_eq!(config.source.base_url, "http://localhost:9000");
        assert_eq!(config.source.root_path, "/apps-script/reference");
        assert_eq!(config.output.path, PathBuf::from("out/types.d.ts"));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.run.limit, Some(3));
        assert_eq!(config.run.filter.as_deref(), Some("sheet"));
        assert_eq!(config.run.throttle_ms, 0);
        assert_eq!(config.run.root_namespace, "Scripts");
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let cli = Cli::try_parse_from(["refgen"]).unwrap();
        let mut config = Config::default();
        cli.apply_to(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["refgen", "-v", "-q"]).is_err());
    }
}
