//! Where documentation pages come from.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::Result;

/// Retrieves raw page bodies by path.
///
/// Paths are as they appear in page links: relative to the documentation
/// host (`/apps-script/reference/spreadsheet`) or absolute URLs.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the page at `path`.
    ///
    /// Returns `Ok(None)` when the page does not exist (non-success status)
    /// and `Err` when it could not be retrieved at all.
    async fn fetch(&self, path: &str) -> Result<Option<String>>;

    /// Human-readable location of `path`, used in error messages.
    fn locate(&self, path: &str) -> String {
        path.to_string()
    }
}

/// In-memory pages keyed by path.
///
/// Used for offline runs over saved pages and throughout the tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pages: HashMap<String, String>,
}

impl StaticSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page, builder style.
    #[must_use]
    pub fn with_page(mut self, path: impl Into<String>, html: impl Into<String>) -> Self {
        self.insert(path, html);
        self
    }

    /// Add or replace a page.
    pub fn insert(&mut self, path: impl Into<String>, html: impl Into<String>) {
        self.pages.insert(path.into(), html.into());
    }

    /// Number of stored pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no pages are stored.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[async_trait]
impl DocumentSource for StaticSource {
    async fn fetch(&self, path: &str) -> Result<Option<String>> {
        Ok(self.pages.get(path).cloned())
    }
}
