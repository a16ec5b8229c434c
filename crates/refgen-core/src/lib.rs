//! # refgen-core
//!
//! Core functionality for refgen: type declarations generated from an HTML API
//! reference site.
//!
//! The reference site documents a scripting platform as a tree of pages: a
//! root listing of services, one page per service with a member table, and
//! one detail page per member. This crate walks that tree and produces an
//! ambient declaration file with one namespace per service.
//!
//! ## Architecture
//!
//! - **Extraction**: CSS selectors ([`selectors`]) applied to parsed pages
//!   ([`page`]) yield plain rows ([`extract`])
//! - **Building**: rows become classified skeletons, then populated enums and
//!   interfaces ([`builder`]), with object parameters lifted into options
//!   types ([`lift`]) and method prose merged into doc comments
//!   ([`doc_comment`])
//! - **Assembly and output**: declarations are grouped per service under one
//!   ambient root ([`namespace`]) and rendered ([`emit`])
//! - **Driving**: [`Pipeline`] sequences fetching, building, emitting and
//!   throttling over an injected [`DocumentSource`]
//!
//! ## Quick Start
//!
//! ```rust
//! use refgen_core::{MemoryEmitter, NoThrottle, OutputFormat, Pipeline, PipelineOptions, StaticSource};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> refgen_core::Result<()> {
//! let source = StaticSource::new().with_page("/apps-script/reference", "<html></html>");
//! let mut pipeline = Pipeline::new(
//!     source,
//!     NoThrottle,
//!     MemoryEmitter::new(OutputFormat::Dts),
//!     PipelineOptions::default(),
//! );
//!
//! let report = pipeline.run().await?;
//! assert_eq!(report.discovered, 0);
//! assert_eq!(
//!     pipeline.emitter().last(),
//!     Some("declare namespace GoogleAppsScript {\n}\n")
//! );
//! # Ok(())
//! # }
//! ```

/// Declaration builder: skeletons and population
pub mod builder;
/// Heuristic predicates over documentation prose
pub mod classify;
/// Layered run configuration
pub mod config;
/// Method doc comment synthesis
pub mod doc_comment;
/// Declaration rendering and output sinks
pub mod emit;
/// Error types and result aliases
pub mod error;
/// Row extraction from parsed pages
pub mod extract;
/// HTTP document source
pub mod fetcher;
/// Options types lifted from advanced parameter tables
pub mod lift;
/// Namespace assembly
pub mod namespace;
/// Documented type token normalization
pub mod normalize;
/// Parsed page queries
pub mod page;
/// Sequential generation driver
pub mod pipeline;
/// Reference site selector contract
pub mod selectors;
/// Document source abstraction
pub mod source;
/// Declaration model
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use emit::{DeclarationPrinter, Emitter, FileEmitter, MemoryEmitter, OutputFormat};
pub use error::{Error, Result};
pub use fetcher::HttpSource;
pub use pipeline::{
    NoThrottle, Pipeline, PipelineOptions, PipelineState, ProgressCallback, RunReport,
    ServiceReport, SleepThrottle, Throttle,
};
pub use source::{DocumentSource, StaticSource};
pub use types::*;
