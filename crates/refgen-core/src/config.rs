//! Configuration management for refgen runs.
//!
//! Settings are layered, later layers winning:
//!
//! 1. **Defaults**: the public reference site, one second between services,
//!    `index.d.ts` in the working directory
//! 2. **Config file**: an explicit `--config` file, else `config.toml` in the
//!    platform config directory (see [`Config::default_path`])
//! 3. **Environment variables**: `REFGEN_*` prefix
//! 4. **Command-line flags**, applied by the CLI
//!
//! ## Example Configuration File
//!
//! ```toml
//! [source]
//! base_url = "https://developers.google.com"
//! root_path = "/apps-script/reference"
//! timeout_secs = 30
//!
//! [run]
//! throttle_ms = 1000
//! filter = "spreadsheet"
//! root_namespace = "GoogleAppsScript"
//!
//! [output]
//! path = "types/index.d.ts"
//! format = "dts"
//! ```
//!
//! ```rust
//! use refgen_core::Config;
//!
//! let config: Config = toml::from_str("[run]\nlimit = 2\n")?;
//! assert_eq!(config.run.limit, Some(2));
//! assert_eq!(config.run.root_namespace, "GoogleAppsScript");
//! # Ok::<(), toml::de::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::emit::OutputFormat;
use crate::fetcher::DEFAULT_USER_AGENT;
use crate::namespace::DEFAULT_ROOT_NAMESPACE;
use crate::{Error, Result};

/// Default documentation host.
pub const DEFAULT_BASE_URL: &str = "https://developers.google.com";
/// Default path of the root listing page.
pub const DEFAULT_ROOT_PATH: &str = "/apps-script/reference";
/// Default pause after each service, in milliseconds.
pub const DEFAULT_THROTTLE_MS: u64 = 1000;
/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default output file.
pub const DEFAULT_OUTPUT_PATH: &str = "index.d.ts";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "REFGEN_";

/// Complete run configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where pages are fetched from.
    pub source: SourceConfig,
    /// Pipeline behavior.
    pub run: RunConfig,
    /// Where the artifact is written.
    pub output: OutputConfig,
}

/// `[source]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Documentation host every link is resolved against.
    pub base_url: String,
    /// Path of the root listing page.
    pub root_path: String,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            root_path: DEFAULT_ROOT_PATH.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `[run]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Pause after each service, in milliseconds.
    pub throttle_ms: u64,
    /// Process only the first N selected services.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Process only services whose link path contains this text
    /// (case-insensitive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Name of the ambient root namespace.
    pub root_namespace: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            throttle_ms: DEFAULT_THROTTLE_MS,
            limit: None,
            filter: None,
            root_namespace: DEFAULT_ROOT_NAMESPACE.to_string(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Artifact path.
    pub path: PathBuf,
    /// Artifact format.
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            format: OutputFormat::Dts,
        }
    }
}

impl Config {
    /// Load configuration from `explicit`, else from the default location.
    ///
    /// An explicit file must exist. A missing default file yields defaults.
    /// Environment overrides are applied on top.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_from(path)?,
            None => match Self::default_path() {
                Ok(path) if path.exists() => Self::load_from(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config {}: {e}", path.display())))
    }

    /// Platform config file location.
    ///
    /// - Linux: `~/.config/refgen/config.toml`
    /// - macOS: `~/Library/Application Support/dev.refgen.refgen/config.toml`
    /// - Windows: `%APPDATA%\refgen\refgen\config\config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = directories::ProjectDirs::from("dev", "refgen", "refgen")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Apply `REFGEN_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply `REFGEN_*` overrides from an arbitrary lookup.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |name: &str| {
            lookup(&format!("{ENV_PREFIX}{name}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = var("BASE_URL") {
            self.source.base_url = v;
        }
        if let Some(v) = var("ROOT_PATH") {
            self.source.root_path = v;
        }
        if let Some(v) = var("USER_AGENT") {
            self.source.user_agent = v;
        }
        if let Some(v) = var("TIMEOUT_SECS") {
            self.source.timeout_secs = parse_number("TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = var("THROTTLE_MS") {
            self.run.throttle_ms = parse_number("THROTTLE_MS", &v)?;
        }
        if let Some(v) = var("LIMIT") {
            self.run.limit = Some(parse_number("LIMIT", &v)?);
        }
        if let Some(v) = var("FILTER") {
            self.run.filter = Some(v);
        }
        if let Some(v) = var("ROOT_NAMESPACE") {
            self.run.root_namespace = v;
        }
        if let Some(v) = var("OUTPUT") {
            self.output.path = PathBuf::from(v);
        }
        if let Some(v) = var("FORMAT") {
            self.output.format = v.parse()?;
        }
        Ok(())
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.source.base_url.trim().is_empty() {
            return Err(Error::Config("source.base_url must not be empty".into()));
        }
        if self.source.timeout_secs == 0 {
            return Err(Error::Config("source.timeout_secs must be positive".into()));
        }
        if self.run.root_namespace.trim().is_empty() {
            return Err(Error::Config("run.root_namespace must not be empty".into()));
        }
        if self.run.limit == Some(0) {
            return Err(Error::Config("run.limit must be at least 1".into()));
        }
        Ok(())
    }

    /// Request timeout as a duration.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_secs)
    }

    /// Per-service pause as a duration.
    pub const fn throttle(&self) -> Duration {
        Duration::from_millis(self.run.throttle_ms)
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("{ENV_PREFIX}{name} must be a number, got '{value}'")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.source.base_url, "https://developers.google.com");
        assert_eq!(config.source.root_path, "/apps-script/reference");
        assert_eq!(config.run.throttle_ms, 1000);
        assert_eq!(config.run.root_namespace, "GoogleAppsScript");
        assert_eq!(config.output.path, PathBuf::from("index.d.ts"));
        assert_eq!(config.output.format, OutputFormat::Dts);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.path, PathBuf::from("index.d.ts"));
        assert_eq!(config.source, SourceConfig::default());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[run\nthrottle_ms = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert_eq!(err.category(), "config");
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_with(env(&[
                ("REFGEN_BASE_URL", "http://localhost:8080"),
                ("REFGEN_THROTTLE_MS", "0"),
                ("REFGEN_LIMIT", "2"),
                ("REFGEN_FILTER", " spreadsheet "),
                ("REFGEN_FORMAT", "json"),
                ("REFGEN_ROOT_NAMESPACE", ""),
            ]))
            .unwrap();

        assert_eq!(config.source.base_url, "http://localhost:8080");
        assert_eq!(config.run.throttle_ms, 0);
        assert_eq!(config.run.limit, Some(2));
        assert_eq!(config.run.filter.as_deref(), Some("spreadsheet"));
        assert_eq!(config.output.format, OutputFormat::Json);
        // Empty values are ignored
        assert_eq!(config.run.root_namespace, "GoogleAppsScript");
    }

    #[test]
    fn test_env_bad_number() {
        let mut config = Config::default();
        let err = config
            .apply_env_with(env(&[("REFGEN_THROTTLE_MS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("REFGEN_THROTTLE_MS"));
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.run.limit = Some(0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.source.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.run.root_namespace = "  ".into();
        assert!(config.validate().is_err());
    }

    proptest! {
        #[test]
        fn test_throttle_duration(ms in 0u64..10_000_000) {
            let mut config = Config::default();
            config.run.throttle_ms = ms;
            prop_assert_eq!(config.throttle().as_millis(), u128::from(ms));
        }

        #[test]
        fn test_toml_roundtrip(
            limit in proptest::option::of(1usize..1000),
            throttle_ms in 0u64..100_000,
            filter in proptest::option::of("[a-z]{1,12}"),
        ) {
            let mut config = Config::default();
            config.run.limit = limit;
            config.run.throttle_ms = throttle_ms;
            config.run.filter = filter;

            let text = toml::to_string_pretty(&config).unwrap();
            let back: Config = toml::from_str(&text).unwrap();
            prop_assert_eq!(back, config);
        }
    }
}
