//! Sequential generation run over every documented service.
//!
//! The driver walks the reference site one page at a time:
//!
//! ```text
//! Discovering -> ProcessingService(0) -> Emitting(0) -> Throttling(0)
//!             -> ProcessingService(1) -> ...                         -> Done
//! ```
//!
//! Page retrieval, pausing and output are injected through
//! [`DocumentSource`], [`Throttle`] and [`Emitter`], so a run over
//! [`StaticSource`](crate::StaticSource) with [`NoThrottle`] and a
//! [`MemoryEmitter`](crate::MemoryEmitter) is fully deterministic.
//!
//! Failing to fetch the root listing or a service page ends the run with
//! [`Error::Fetch`]. A member detail page that cannot be fetched leaves the
//! member's skeleton empty and is recorded in the [`RunReport`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::builder::{build_skeletons, populate};
use crate::config::Config;
use crate::emit::Emitter;
use crate::extract::{self, DetailPage, ServicePage};
use crate::namespace::{assemble_service, service_namespace_name, wrap_ambient};
use crate::normalize::capitalize;
use crate::page::Page;
use crate::source::DocumentSource;
use crate::types::{NamespaceNode, ServiceDescriptor};
use crate::{Error, Result};

/// Pause inserted after each processed service.
#[async_trait]
pub trait Throttle: Send + Sync {
    /// Wait before the next service. Not cancellable.
    async fn pause(&self);
}

/// Sleeps for a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct SleepThrottle(pub Duration);

#[async_trait]
impl Throttle for SleepThrottle {
    async fn pause(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// Does not wait at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThrottle;

#[async_trait]
impl Throttle for NoThrottle {
    async fn pause(&self) {}
}

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum PipelineState {
    /// Not started.
    Idle,
    /// Fetching and reading the root listing.
    Discovering,
    /// Building declarations for the service at this position.
    ProcessingService(usize),
    /// Writing the tree after the service at this position.
    Emitting(usize),
    /// Pausing after the service at this position.
    Throttling(usize),
    /// All selected services processed.
    Done,
}

/// Which services a run processes and how the tree is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Path of the root listing page.
    pub root_path: String,
    /// Name of the ambient root namespace.
    pub root_namespace: String,
    /// Process at most this many services.
    pub limit: Option<usize>,
    /// Process only services whose link path contains this text
    /// (case-insensitive).
    pub filter: Option<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineOptions {
    fn from(config: &Config) -> Self {
        Self {
            root_path: config.source.root_path.clone(),
            root_namespace: config.run.root_namespace.clone(),
            limit: config.run.limit,
            filter: config.run.filter.clone(),
        }
    }
}

impl PipelineOptions {
    /// Apply filter and limit to discovered service links.
    pub fn select(&self, links: Vec<String>) -> Vec<String> {
        let filter = self
            .filter
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_lowercase);

        links
            .into_iter()
            .filter(|link| {
                filter
                    .as_deref()
                    .is_none_or(|f| link.to_lowercase().contains(f))
            })
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}

/// Outcome of one service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceReport {
    /// Namespace name.
    pub name: String,
    /// Service page path.
    pub source_path: String,
    /// Declarations built from the member table.
    pub members: usize,
    /// Declarations populated from their detail page.
    pub populated: usize,
    /// Detail paths that could not be fetched.
    pub skipped: Vec<String>,
    /// Options types lifted from advanced parameter tables.
    pub options_types: Vec<String>,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Service links found on the root listing.
    pub discovered: usize,
    /// Per-service results in processing order.
    pub services: Vec<ServiceReport>,
}

impl RunReport {
    /// Total declarations across all services.
    pub fn total_members(&self) -> usize {
        self.services.iter().map(|s| s.members).sum()
    }

    /// Total skipped detail pages across all services.
    pub fn total_skipped(&self) -> usize {
        self.services.iter().map(|s| s.skipped.len()).sum()
    }

    /// Total lifted options types across all services.
    pub fn total_options_types(&self) -> usize {
        self.services.iter().map(|s| s.options_types.len()).sum()
    }
}

/// Progress callback, called with (completed, total, service name) after
/// each service is emitted.
pub type ProgressCallback = Arc<dyn Fn(usize, usize, &str) + Send + Sync>;

/// Generation run over a document source.
pub struct Pipeline<S, T, E> {
    source: S,
    throttle: T,
    emitter: E,
    options: PipelineOptions,
    state: PipelineState,
    progress: Option<ProgressCallback>,
}

impl<S, T, E> std::fmt::Debug for Pipeline<S, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<S, T, E> Pipeline<S, T, E>
where
    S: DocumentSource,
    T: Throttle,
    E: Emitter,
{
    /// Create a pipeline from its collaborators.
    pub fn new(source: S, throttle: T, emitter: E, options: PipelineOptions) -> Self {
        Self {
            source,
            throttle,
            emitter,
            options,
            state: PipelineState::Idle,
            progress: None,
        }
    }

    /// Report progress after each service.
    #[must_use]
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(callback));
        self
    }

    /// Current state.
    pub const fn state(&self) -> PipelineState {
        self.state
    }

    /// The emitter, e.g. to inspect captured output.
    pub const fn emitter(&self) -> &E {
        &self.emitter
    }

    /// Run over every selected service.
    pub async fn run(&mut self) -> Result<RunReport> {
        self.transition(PipelineState::Discovering);

        let root_path = self.options.root_path.clone();
        let body = self.fetch_required(&root_path).await?;
        let links = {
            let page = Page::parse(&body);
            extract::service_links(&page)
        };
        let discovered = links.len();
        let selected = self.options.select(links);
        info!(
            "Discovered {} services, processing {}",
            discovered,
            selected.len()
        );

        let mut report = RunReport {
            discovered,
            services: Vec::with_capacity(selected.len()),
        };
        let mut namespaces: Vec<NamespaceNode> = Vec::with_capacity(selected.len());

        if selected.is_empty() {
            self.emitter
                .emit(&wrap_ambient(&self.options.root_namespace, []))?;
        }

        for (index, link) in selected.iter().enumerate() {
            self.transition(PipelineState::ProcessingService(index));
            let (namespace, service_report) = self.process_service(link).await?;
            info!(
                "Processed {} ({} members, {} skipped, {} options types)",
                service_report.name,
                service_report.members,
                service_report.skipped.len(),
                service_report.options_types.len()
            );
            namespaces.push(namespace);

            self.transition(PipelineState::Emitting(index));
            let root = wrap_ambient(&self.options.root_namespace, namespaces.iter().cloned());
            self.emitter.emit(&root)?;

            if let Some(progress) = &self.progress {
                progress(index + 1, selected.len(), &service_report.name);
            }
            report.services.push(service_report);

            self.transition(PipelineState::Throttling(index));
            self.throttle.pause().await;
        }

        self.transition(PipelineState::Done);
        Ok(report)
    }

    async fn process_service(&self, link: &str) -> Result<(NamespaceNode, ServiceReport)> {
        let body = self.fetch_required(link).await?;
        let service_page = {
            let page = Page::parse(&body);
            extract::service_page(&page)
        };

        let descriptor = descriptor(link, &service_page);
        let mut skeletons = build_skeletons(&service_page.members);
        let mut options = Vec::new();
        let mut report = ServiceReport {
            name: descriptor.name.clone(),
            source_path: link.to_string(),
            members: skeletons.len(),
            ..ServiceReport::default()
        };

        for (path, decl) in &mut skeletons {
            match self.source.fetch(path).await {
                Ok(Some(body)) => {
                    let detail = parse_detail(&body);
                    let lifted = populate(decl, &detail);
                    debug!(
                        member = %decl.name,
                        options = lifted.len(),
                        "populated declaration"
                    );
                    options.extend(lifted);
                    report.populated += 1;
                },
                Ok(None) => {
                    warn!(member = %decl.name, url = %self.source.locate(path), "detail page not found, keeping empty declaration");
                    report.skipped.push(path.clone());
                },
                Err(e) => {
                    warn!(
                        member = %decl.name,
                        url = %self.source.locate(path),
                        category = e.category(),
                        recoverable = e.is_recoverable(),
                        "detail page fetch failed: {e}"
                    );
                    report.skipped.push(path.clone());
                },
            }
        }

        report.options_types = options.iter().map(|o| o.name.clone()).collect();
        let namespace = assemble_service(&descriptor, skeletons.into_values(), options);
        Ok((namespace, report))
    }

    async fn fetch_required(&self, path: &str) -> Result<String> {
        let url = self.source.locate(path);
        match self.source.fetch(path).await {
            Ok(Some(body)) => Ok(body),
            Ok(None) => Err(Error::Fetch {
                url,
                reason: "page not found".to_string(),
            }),
            Err(e) => Err(Error::Fetch {
                url,
                reason: e.to_string(),
            }),
        }
    }

    fn transition(&mut self, state: PipelineState) {
        debug!(from = ?self.state, to = ?state, "pipeline state");
        self.state = state;
    }
}

fn parse_detail(body: &str) -> DetailPage {
    let page = Page::parse(body);
    extract::detail_page(&page)
}

fn descriptor(link: &str, page: &ServicePage) -> ServiceDescriptor {
    let mut name = service_namespace_name(&page.title);
    if name.is_empty() {
        // Untitled page: fall back to the last path segment.
        let segment = link.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
        name = segment
            .split(|c: char| c == '-' || c == '_')
            .map(capitalize)
            .collect();
    }

    ServiceDescriptor {
        name,
        description: page.description.clone(),
        source_path: link.to_string(),
    }
}
