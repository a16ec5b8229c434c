//! Rendering and persistence of the assembled namespace tree.
//!
//! [`DeclarationPrinter`] renders a [`NamespaceNode`] as ambient declaration
//! text:
//!
//! ```text
//! declare namespace GoogleAppsScript {
//!     namespace Spreadsheet {
//!         enum Color {
//!             RED,
//!         }
//!         interface Range {
//!             setOptions(options: SetOptionsOptions): Range;
//!         }
//!     }
//! }
//! ```
//!
//! An [`Emitter`] decides where the rendering goes. The pipeline calls it
//! once per processed service with the cumulative tree, so emitters must
//! replace earlier output rather than append to it.

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{
    Declaration, DeclarationKind, EnumMember, MethodDeclaration, NamespaceMember, NamespaceNode,
    ParameterDeclaration, PropertyDeclaration,
};
use crate::{Error, Result};

const INDENT: &str = "    ";

/// Serialization format of the emitted artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Ambient declaration text.
    #[default]
    Dts,
    /// Pretty-printed JSON of the namespace tree.
    Json,
}

impl OutputFormat {
    /// Render `root` in this format.
    pub fn render(self, root: &NamespaceNode) -> Result<String> {
        match self {
            Self::Dts => DeclarationPrinter::new().render(root),
            Self::Json => Ok(serde_json::to_string_pretty(root)?),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dts" | "d.ts" => Ok(Self::Dts),
            "json" => Ok(Self::Json),
            other => Err(Error::Config(format!(
                "unknown output format '{other}' (expected 'dts' or 'json')"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dts => "dts",
            Self::Json => "json",
        })
    }
}

/// Destination of the assembled namespace tree.
pub trait Emitter {
    /// Write the cumulative root namespace, replacing any earlier emission.
    fn emit(&mut self, root: &NamespaceNode) -> Result<()>;
}

/// Writes the rendering to a fixed file path.
#[derive(Debug, Clone)]
pub struct FileEmitter {
    path: PathBuf,
    format: OutputFormat,
}

impl FileEmitter {
    /// Create an emitter writing `format` to `path`.
    pub fn new(path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Emitter for FileEmitter {
    fn emit(&mut self, root: &NamespaceNode) -> Result<()> {
        let rendered = self.format.render(root)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Write to a sibling temp file, then rename over the target.
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, rendered.as_bytes())?;
        std::fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), bytes = rendered.len(), "emitted declarations");
        Ok(())
    }
}

/// Keeps every rendering in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryEmitter {
    format: OutputFormat,
    emissions: Vec<String>,
}

impl MemoryEmitter {
    /// Create an emitter capturing `format` renderings.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            emissions: Vec::new(),
        }
    }

    /// All renderings, oldest first.
    pub fn emissions(&self) -> &[String] {
        &self.emissions
    }

    /// The most recent rendering.
    pub fn last(&self) -> Option<&str> {
        self.emissions.last().map(String::as_str)
    }
}

impl Emitter for MemoryEmitter {
    fn emit(&mut self, root: &NamespaceNode) -> Result<()> {
        self.emissions.push(self.format.render(root)?);
        Ok(())
    }
}

/// Renders namespace trees as ambient declaration text.
#[derive(Debug, Default)]
pub struct DeclarationPrinter {
    out: String,
    depth: usize,
}

impl DeclarationPrinter {
    /// Create an empty printer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `root` and its descendants.
    pub fn render(mut self, root: &NamespaceNode) -> Result<String> {
        self.namespace(root)
            .map_err(|e| Error::Emit(format!("failed to render namespace '{}': {e}", root.name)))?;
        Ok(self.out)
    }

    fn line(&mut self, text: &str) -> fmt::Result {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        writeln!(self.out, "{text}")
    }

    fn comment(&mut self, lines: &[String]) -> fmt::Result {
        let lines: Vec<String> = lines.iter().map(|l| escape_comment(l)).collect();
        match lines.as_slice() {
            [] => Ok(()),
            [single] if !single.is_empty() => self.line(&format!("/** {single} */")),
            _ => {
                self.line("/**")?;
                for line in &lines {
                    if line.is_empty() {
                        self.line(" *")?;
                    } else {
                        self.line(&format!(" * {line}"))?;
                    }
                }
                self.line(" */")
            },
        }
    }

    fn description(&mut self, text: &str) -> fmt::Result {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        let lines: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
        self.comment(&lines)
    }

    fn namespace(&mut self, node: &NamespaceNode) -> fmt::Result {
        if let Some(description) = &node.description {
            self.description(description)?;
        }

        let keyword = if node.ambient {
            "declare namespace"
        } else {
            "namespace"
        };
        self.line(&format!("{keyword} {} {{", node.name))?;
        self.depth += 1;

        for member in &node.members {
            match member {
                NamespaceMember::Declaration(decl) => self.declaration(decl)?,
                NamespaceMember::Namespace(child) => self.namespace(child)?,
            }
        }

        self.depth -= 1;
        self.line("}")
    }

    fn declaration(&mut self, decl: &Declaration) -> fmt::Result {
        self.description(&decl.description)?;

        match &decl.kind {
            DeclarationKind::Enum { members } => {
                self.line(&format!("enum {} {{", decl.name))?;
                self.depth += 1;
                for member in members {
                    self.enum_member(member)?;
                }
            },
            DeclarationKind::Interface {
                properties,
                methods,
            } => {
                self.line(&format!("interface {} {{", decl.name))?;
                self.depth += 1;
                for property in properties {
                    self.property(property)?;
                }
                for method in methods {
                    self.method(method)?;
                }
            },
        }

        self.depth -= 1;
        self.line("}")
    }

    fn enum_member(&mut self, member: &EnumMember) -> fmt::Result {
        self.description(&member.description)?;
        let name = property_name(&member.name);
        match &member.value {
            Some(value) => self.line(&format!("{name} = {value},")),
            None => self.line(&format!("{name},")),
        }
    }

    fn property(&mut self, property: &PropertyDeclaration) -> fmt::Result {
        self.description(&property.description)?;
        let optional = if property.optional { "?" } else { "" };
        self.line(&format!(
            "{}{optional}: {};",
            property_name(&property.name),
            property.type_ref
        ))
    }

    fn method(&mut self, method: &MethodDeclaration) -> fmt::Result {
        match &method.doc {
            Some(doc) => self.comment(&doc.lines())?,
            None => self.description(&method.description)?,
        }

        let params: Vec<String> = method.parameters.iter().map(parameter).collect();
        self.line(&format!(
            "{}({}): {};",
            property_name(&method.name),
            params.join(", "),
            method.return_type
        ))
    }
}

fn parameter(param: &ParameterDeclaration) -> String {
    let rest = if param.rest { "..." } else { "" };
    let optional = if param.optional || param.default.is_some() {
        "?"
    } else {
        ""
    };
    format!("{rest}{}{optional}: {}", param.name, param.type_ref)
}

/// The name as written, or quoted when it is not a plain identifier.
fn property_name(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("{name:?}")
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn escape_comment(line: &str) -> String {
    line.replace("*/", "*\\/")
}
