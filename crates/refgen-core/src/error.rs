//! Error types and handling for refgen-core operations.
//!
//! Errors are grouped by where they arise in a generation run:
//!
//! - **I/O Errors**: writing the emitted artifact, reading config files
//! - **Network Errors**: fetching listing and detail pages
//! - **Extraction Errors**: invalid selectors, malformed documents
//! - **Configuration Errors**: invalid settings or config files
//! - **Emission Errors**: rendering the namespace tree
//!
//! Only some of them end a run. A failed member detail fetch is swallowed by
//! the pipeline and reported; failing to fetch the root listing or a service
//! page surfaces as an error naming the unreachable URL.
//!
//! ```rust
//! use refgen_core::Error;
//!
//! let err = Error::Fetch {
//!     url: "https://example.com/reference".to_string(),
//!     reason: "page not found".to_string(),
//! };
//! assert_eq!(err.category(), "fetch");
//! assert!(!err.is_recoverable());
//! ```

use thiserror::Error;

/// The main error type for refgen-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers writing the declaration artifact and reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// The underlying `reqwest::Error` is preserved for connection details.
    /// Connection and timeout failures are recoverable.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A page that the run depends on could not be retrieved.
    ///
    /// Raised for the root listing page and for service pages. The message
    /// carries the full URL that was requested.
    #[error("Failed to GET {url}: {reason}")]
    Fetch {
        /// URL that could not be retrieved.
        url: String,
        /// Why the fetch failed.
        reason: String,
    },

    /// URL is malformed or cannot be joined with the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A CSS selector could not be parsed.
    #[error("Selector error: {0}")]
    Selector(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The assembled namespace tree could not be emitted.
    #[error("Emit error: {0}")]
    Emit(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Network timeouts and connection failures, as well as interrupted I/O,
    /// are considered transient. Everything else is permanent.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful for logging and for grouping failures in run reports.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Fetch { .. } => "fetch",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Selector(_) => "selector",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
            Self::Emit(_) => "emit",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
