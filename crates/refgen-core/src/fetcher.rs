//! HTTP document source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::source::DocumentSource;
use crate::{Error, Result};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("refgen/", env!("CARGO_PKG_VERSION"));

/// HTTP client for fetching documentation pages
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    /// Creates a source rooted at `base_url` with default settings
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_options(base_url, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Creates a source with a custom timeout and user agent
    pub fn with_options(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!(
                "'{base_url}' cannot be used as a base URL"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client, base })
    }

    /// Resolves a link path against the base URL
    pub fn resolve(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path.trim())?)
    }
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<Option<String>> {
        let url = self.resolve(path)?;
        debug!("Fetching {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("GET {} returned {}", url, status);
            return Ok(None);
        }

        let body = response.text().await?;
        debug!("Fetched {} ({} bytes)", url, body.len());
        Ok(Some(body))
    }

    fn locate(&self, path: &str) -> String {
        self.resolve(path)
            .map_or_else(|_| path.to_string(), String::from)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_resolve_relative_and_absolute() {
        let source = HttpSource::new("https://developers.google.com").unwrap();

        assert_eq!(
            source.resolve("/apps-script/reference").unwrap().as_str(),
            "https://developers.google.com/apps-script/reference"
        );
        assert_eq!(
            source.resolve("https://other.example/x").unwrap().as_str(),
            "https://other.example/x"
        );
        assert_eq!(
            source.locate("/apps-script/reference/spreadsheet"),
            "https://developers.google.com/apps-script/reference/spreadsheet"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpSource::new("not a url").unwrap_err();
        assert_eq!(err.category(), "invalid_url");

        let err = HttpSource::new("mailto:someone@example.com").unwrap_err();
        assert_eq!(err.category(), "invalid_url");
    }

    #[tokio::test]
    async fn test_fetch_success() -> anyhow::Result<()> {
        // Given: A server returning a documentation page
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/apps-script/reference"))
            .and(header("user-agent", "refgen-test"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>root</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let source = HttpSource::with_options(&server.uri(), DEFAULT_TIMEOUT, "refgen-test")?;

        // When: Fetching by relative path
        let body = source.fetch("/apps-script/reference").await?;

        // Then: The body is returned
        assert_eq!(body.as_deref(), Some("<html>root</html>"));
        Ok(())
    }

    #[tokio::test]
    async fn test_non_success_status_is_absent() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let source = HttpSource::new(&server.uri())?;
        assert_eq!(source.fetch("/missing").await?, None);
        assert_eq!(source.fetch("/broken").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_transport_failure_is_error() {
        // Given: A server that responds slower than the client timeout
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let source = HttpSource::with_options(
            &server.uri(),
            Duration::from_millis(100),
            DEFAULT_USER_AGENT,
        )
        .unwrap();

        // Then: The fetch fails instead of reporting an absent page
        let err = source.fetch("/slow").await.unwrap_err();
        assert_eq!(err.category(), "network");
        assert!(err.is_recoverable());
    }
}
