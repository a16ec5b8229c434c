//! Extraction of raw rows from documentation pages.
//!
//! Everything here converts a [`Page`] into owned, DOM-free values so the
//! builder can work on plain data. Extraction never fails; absent cells or
//! tables produce empty strings and empty lists.

use serde::{Deserialize, Serialize};

use crate::page::{Page, Query};
use crate::selectors::CONTRACT;

/// Title, description and member listing of a service page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePage {
    /// Page title, e.g. `Spreadsheet Service`.
    pub title: String,
    /// First descriptive paragraph.
    pub description: String,
    /// Rows of the class/member table.
    pub members: Vec<MemberRow>,
}

/// One row of a service's member table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRow {
    /// Member name.
    pub name: String,
    /// Short description, used for classification.
    pub description: String,
    /// Link to the member's detail page, if the row has one.
    pub detail_path: Option<String>,
}

/// A `name | type | description` row (properties, enum values, parameters).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRow {
    /// Name cell.
    pub name: String,
    /// Documented type token.
    pub type_name: String,
    /// Description cell.
    pub description: String,
}

impl FieldRow {
    /// Build a row from its three cells.
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            description: description.into(),
        }
    }
}

/// One method detail block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBlock {
    /// Heading with name and signature, e.g. `setOptions(options)`.
    pub heading: String,
    /// Summary paragraph.
    pub summary: String,
    /// Example code, empty when absent.
    pub example: String,
    /// Combined `Type - description` return text.
    pub returns: String,
    /// Primary parameter table.
    pub params: Vec<FieldRow>,
    /// Secondary advanced parameter table.
    pub advanced_params: Vec<FieldRow>,
}

impl MethodBlock {
    /// Method name: the heading up to the first `(`.
    pub fn method_name(&self) -> &str {
        self.heading
            .split('(')
            .next()
            .unwrap_or_default()
            .trim()
    }
}

/// Contents of a member detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailPage {
    /// Property rows (or enum value rows).
    pub fields: Vec<FieldRow>,
    /// Method blocks in document order.
    pub methods: Vec<MethodBlock>,
}

/// Service page links listed on the root page, in order, without duplicates.
pub fn service_links(page: &Page) -> Vec<String> {
    let mut links = page.links_at(&CONTRACT.service_links);
    let mut seen = std::collections::HashSet::new();
    links.retain(|link| seen.insert(link.clone()));
    links
}

/// Read a service page.
pub fn service_page(page: &Page) -> ServicePage {
    let members = page
        .select_all(&CONTRACT.member_rows)
        .into_iter()
        .map(|row| MemberRow {
            name: row.text_at(&CONTRACT.cell_name),
            description: row.text_at(&CONTRACT.cell_type),
            detail_path: row.links_at(&CONTRACT.cell_name_link).into_iter().next(),
        })
        .collect();

    ServicePage {
        title: page.text_at(&CONTRACT.service_title),
        description: page.text_at(&CONTRACT.service_description),
        members,
    }
}

/// Read a member detail page.
pub fn detail_page(page: &Page) -> DetailPage {
    let fields = field_rows(page, &CONTRACT.property_rows);

    let methods = page
        .select_all(&CONTRACT.method_blocks)
        .into_iter()
        .map(|block| MethodBlock {
            heading: block.text_at(&CONTRACT.method_heading),
            summary: block.text_at(&CONTRACT.method_summary),
            example: block.raw_text_at(&CONTRACT.method_example),
            returns: block.text_at(&CONTRACT.method_return),
            params: field_rows(&block, &CONTRACT.method_param_rows),
            advanced_params: field_rows(&block, &CONTRACT.method_advanced_param_rows),
        })
        .collect();

    DetailPage { fields, methods }
}

fn field_rows<Q: Query>(scope: &Q, rows: &scraper::Selector) -> Vec<FieldRow> {
    scope
        .find_all(rows)
        .into_iter()
        .map(|row| FieldRow {
            name: row.text_at(&CONTRACT.cell_name),
            type_name: row.text_at(&CONTRACT.cell_type),
            description: row.text_at(&CONTRACT.cell_description),
        })
        .collect()
}
