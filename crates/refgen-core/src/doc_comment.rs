//! Structured method documentation assembled from fragmented prose.
//!
//! A method detail block scatters its documentation over a summary
//! paragraph, an example, one description cell per parameter and a combined
//! `Type - description` return line. [`synthesize`] gathers them into a
//! [`DocComment`]:
//!
//! ```rust
//! use refgen_core::doc_comment::{split_return, synthesize, DocInput};
//!
//! let (ty, desc) = split_return("Range \u{2014} the active range");
//! assert_eq!(ty, "Range");
//! assert_eq!(desc.as_deref(), Some("the active range"));
//!
//! let doc = synthesize(&DocInput {
//!     summary: "Returns the active range.",
//!     example: "",
//!     parameter_names: &[],
//!     parameter_descriptions: &[],
//!     return_description: desc.as_deref(),
//! })
//! .expect("summary present");
//! assert_eq!(doc.summary.as_deref(), Some("Returns the active range."));
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Whitespace-surrounded hyphen, dash or minus sign.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static RETURN_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+[-\x{2010}-\x{2015}\x{2212}]\s+").unwrap());

/// Description of one parameter, paired positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDoc {
    /// Parameter name as declared.
    pub name: String,
    /// Description text, empty when the page had none.
    pub description: String,
}

/// Leading documentation of a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocComment {
    /// `@summary` tag.
    pub summary: Option<String>,
    /// `@example` tag body (rendered inside a fenced block).
    pub example: Option<String>,
    /// One `@param` tag per declared parameter.
    pub params: Vec<ParamDoc>,
    /// `@returns` tag text.
    pub returns: String,
}

impl DocComment {
    /// Tag lines in emission order, without comment delimiters.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(summary) = &self.summary {
            lines.push(format!("@summary {summary}"));
        }
        if let Some(example) = &self.example {
            lines.push("@example".to_string());
            lines.push("```".to_string());
            lines.extend(example.lines().map(str::to_string));
            lines.push("```".to_string());
        }
        for param in &self.params {
            lines.push(
                format!("@param {} {}", param.name, param.description)
                    .trim_end()
                    .to_string(),
            );
        }
        lines.push(format!("@returns {}", self.returns).trim_end().to_string());

        lines
    }
}

/// Prose fragments collected for one method.
#[derive(Debug, Clone, Copy)]
pub struct DocInput<'a> {
    /// Summary paragraph.
    pub summary: &'a str,
    /// Example code.
    pub example: &'a str,
    /// Declared parameter names, in order.
    pub parameter_names: &'a [String],
    /// Description cells, aligned by position with `parameter_names`.
    pub parameter_descriptions: &'a [String],
    /// Description half of the return line.
    pub return_description: Option<&'a str>,
}

/// Split a combined return line into its type and description halves.
///
/// The split happens at the first whitespace-surrounded dash-family
/// character. Without a separator the whole text is the type.
pub fn split_return(combined: &str) -> (String, Option<String>) {
    let combined = combined.trim();
    match RETURN_SPLIT_RE.find(combined) {
        Some(sep) => {
            let ty = combined[..sep.start()].trim().to_string();
            let desc = combined[sep.end()..].trim();
            (ty, (!desc.is_empty()).then(|| desc.to_string()))
        },
        None => (combined.to_string(), None),
    }
}

/// Build the structured comment, or `None` if every fragment is blank.
///
/// Exactly one `@param` entry is produced per declared parameter; missing
/// descriptions are left blank rather than shifting later ones.
pub fn synthesize(input: &DocInput<'_>) -> Option<DocComment> {
    let summary = non_blank(input.summary);
    let example = non_blank(input.example);
    let returns = input.return_description.unwrap_or_default().trim().to_string();

    let params: Vec<ParamDoc> = input
        .parameter_names
        .iter()
        .enumerate()
        .map(|(i, name)| ParamDoc {
            name: name.clone(),
            description: input
                .parameter_descriptions
                .get(i)
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
        })
        .collect();

    let all_blank = summary.is_none()
        && example.is_none()
        && returns.is_empty()
        && params.iter().all(|p| p.description.is_empty());
    if all_blank {
        return None;
    }

    Some(DocComment {
        summary,
        example,
        params,
        returns,
    })
}

fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
