//! CSS selectors describing the layout of the reference site.
//!
//! Every structural assumption the extractor makes about the documentation
//! pages lives here. Row selectors skip the header row of each table; cell
//! selectors are evaluated relative to a row.

use std::sync::LazyLock;

use scraper::Selector;

/// Service links in the navigation of the root listing page.
pub const SERVICE_LINKS: &str = ".devsite-nav-expandable ul.devsite-nav-section > li.devsite-nav-item:first-child > a[href*='/apps-script/reference/']";
/// Title of a service page.
pub const SERVICE_TITLE: &str = "h1.devsite-page-title";
/// First descriptive paragraph of a service page.
pub const SERVICE_DESCRIPTION: &str = ".devsite-article-body p:first-of-type";
/// Rows of the class/member table of a service page.
pub const MEMBER_ROWS: &str = "#classes + .toc .member tr:not(:first-child)";
/// Rows of the property or enum value table of a detail page.
pub const PROPERTY_ROWS: &str = ".members.property tr:not(:first-child)";
/// Method detail blocks of a detail page.
pub const METHOD_BLOCKS: &str = ".function.doc";
/// Heading with the method name and signature.
pub const METHOD_HEADING: &str = "h3";
/// Primary parameter rows of a method block.
pub const METHOD_PARAM_ROWS: &str = ".function.param tr:not(:first-child)";
/// Advanced parameter rows of a method block.
pub const METHOD_ADVANCED_PARAM_ROWS: &str = ".function.advancedparam tr:not(:first-child)";
/// Combined "type - description" return paragraph.
pub const METHOD_RETURN: &str = "[id*='return'] + p";
/// Summary paragraph of a method block.
pub const METHOD_SUMMARY: &str = "div > p";
/// Example code of a method block.
pub const METHOD_EXAMPLE: &str = "div > pre";
/// First cell of a row (name).
pub const CELL_NAME: &str = "td:first-child";
/// Second cell of a row (type, or description on the member listing).
pub const CELL_TYPE: &str = "td:nth-child(2)";
/// Third cell of a row (description).
pub const CELL_DESCRIPTION: &str = "td:nth-child(3)";
/// Link inside the name cell.
pub const CELL_NAME_LINK: &str = "td:first-child a";

/// Parsed selector set used by the extractor.
#[derive(Debug)]
pub struct SelectorContract {
    /// See [`SERVICE_LINKS`].
    pub service_links: Selector,
    /// See [`SERVICE_TITLE`].
    pub service_title: Selector,
    /// See [`SERVICE_DESCRIPTION`].
    pub service_description: Selector,
    /// See [`MEMBER_ROWS`].
    pub member_rows: Selector,
    /// See [`PROPERTY_ROWS`].
    pub property_rows: Selector,
    /// See [`METHOD_BLOCKS`].
    pub method_blocks: Selector,
    /// See [`METHOD_HEADING`].
    pub method_heading: Selector,
    /// See [`METHOD_PARAM_ROWS`].
    pub method_param_rows: Selector,
    /// See [`METHOD_ADVANCED_PARAM_ROWS`].
    pub method_advanced_param_rows: Selector,
    /// See [`METHOD_RETURN`].
    pub method_return: Selector,
    /// See [`METHOD_SUMMARY`].
    pub method_summary: Selector,
    /// See [`METHOD_EXAMPLE`].
    pub method_example: Selector,
    /// See [`CELL_NAME`].
    pub cell_name: Selector,
    /// See [`CELL_TYPE`].
    pub cell_type: Selector,
    /// See [`CELL_DESCRIPTION`].
    pub cell_description: Selector,
    /// See [`CELL_NAME_LINK`].
    pub cell_name_link: Selector,
}

impl SelectorContract {
    /// Parse the fixed selector strings.
    pub fn parse() -> crate::Result<Self> {
        Ok(Self {
            service_links: parse(SERVICE_LINKS)?,
            service_title: parse(SERVICE_TITLE)?,
            service_description: parse(SERVICE_DESCRIPTION)?,
            member_rows: parse(MEMBER_ROWS)?,
            property_rows: parse(PROPERTY_ROWS)?,
            method_blocks: parse(METHOD_BLOCKS)?,
            method_heading: parse(METHOD_HEADING)?,
            method_param_rows: parse(METHOD_PARAM_ROWS)?,
            method_advanced_param_rows: parse(METHOD_ADVANCED_PARAM_ROWS)?,
            method_return: parse(METHOD_RETURN)?,
            method_summary: parse(METHOD_SUMMARY)?,
            method_example: parse(METHOD_EXAMPLE)?,
            cell_name: parse(CELL_NAME)?,
            cell_type: parse(CELL_TYPE)?,
            cell_description: parse(CELL_DESCRIPTION)?,
            cell_name_link: parse(CELL_NAME_LINK)?,
        })
    }
}

fn parse(selector: &str) -> crate::Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| crate::Error::Selector(format!("invalid selector '{selector}': {e}")))
}

/// The parsed contract shared by all extractions.
///
/// SAFETY: All selector strings are compile-time constants covered by
/// `test_contract_parses`.
#[allow(clippy::expect_used)]
pub static CONTRACT: LazyLock<SelectorContract> = LazyLock::new(|| {
    SelectorContract::parse().expect("selector contract constants must parse")
});
