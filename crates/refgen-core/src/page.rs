//! Thin query layer over a parsed HTML document.
//!
//! Text lookups never fail: a selector that matches nothing yields an empty
//! string, mirroring how missing prose degrades on the reference site.

use scraper::{ElementRef, Html, Selector};

/// A parsed documentation page.
pub struct Page {
    html: Html,
}

impl Page {
    /// Parse a full HTML document.
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// All elements matching `selector`, in document order.
    pub fn select_all<'a>(&'a self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.html.select(selector).collect()
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page").finish_non_exhaustive()
    }
}

/// Text and link lookups shared by documents and elements.
pub trait Query {
    /// First element matching `selector`.
    fn find_first<'a>(&'a self, selector: &Selector) -> Option<ElementRef<'a>>;

    /// All elements matching `selector`.
    fn find_all<'a>(&'a self, selector: &Selector) -> Vec<ElementRef<'a>>;

    /// Whitespace-collapsed text of the first match, or `""`.
    fn text_at(&self, selector: &Selector) -> String {
        self.find_first(selector)
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .unwrap_or_default()
    }

    /// Trimmed text of the first match with inner layout preserved, or `""`.
    ///
    /// Used for preformatted blocks such as code examples.
    fn raw_text_at(&self, selector: &Selector) -> String {
        self.find_first(selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    }

    /// `href` attributes of all matching anchors, in document order.
    fn links_at(&self, selector: &Selector) -> Vec<String> {
        self.find_all(selector)
            .into_iter()
            .filter_map(|el| el.value().attr("href"))
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty())
            .collect()
    }
}

impl Query for Page {
    fn find_first<'a>(&'a self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.html.select(selector).next()
    }

    fn find_all<'a>(&'a self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.select_all(selector)
    }
}

impl Query for ElementRef<'_> {
    fn find_first<'a>(&'a self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.select(selector).next()
    }

    fn find_all<'a>(&'a self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.select(selector).collect()
    }
}

/// Trim and collapse every whitespace run to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
