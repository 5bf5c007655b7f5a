//! Static extraction strategy chain
//!
//! Recovers the latest-episode fields from a fetched page without running
//! its scripts. Strategies run in a fixed order and the first one that
//! yields a title or description wins:
//! - `structured`: embedded JSON-LD blocks
//! - `script`: key/value literals inside inline scripts
//! - `meta`: `<meta>` tags, then the `<title>` element
//! - `probe`: content-detail endpoints derived from the page URL
//!
//! The first three read the parsed document and are pure. The probe issues
//! extra requests, so it runs last.

pub mod meta;
pub mod probe;
pub mod script;
pub mod structured;

use scraper::Html;
use tracing::{debug, info};

use crate::client::FetchClient;
use crate::target::Target;
use crate::types::{EpisodeSummary, ExtractionStatus};

pub use probe::{build_probe_urls, DEFAULT_PROBE_PATHS};

/// Source label for the JSON-LD strategy
pub const SOURCE_STRUCTURED: &str = "structured-markup";
/// Source label for the inline-script strategy
pub const SOURCE_SCRIPT: &str = "script-pattern";
/// Source label for the meta-tag strategy
pub const SOURCE_META: &str = "meta-tags";
/// Source label for the derived-API probe
pub const SOURCE_API: &str = "derived-api";
/// Source label when the chain was exhausted
pub const SOURCE_NONE: &str = "none";

/// Fields recovered by one strategy attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Episode title
    pub title: Option<String>,
    /// Episode synopsis
    pub description: Option<String>,
    /// Air date as printed by the source
    pub air_date: Option<String>,
    /// Label of the strategy that produced these fields
    pub source: &'static str,
}

impl Candidate {
    /// Build a candidate, dropping blank values
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        air_date: Option<String>,
        source: &'static str,
    ) -> Self {
        Self {
            title: non_blank(title),
            description: non_blank(description),
            air_date: non_blank(air_date),
            source,
        }
    }

    /// A candidate is accepted when it has a title or a description
    pub fn is_usable(&self) -> bool {
        self.title.is_some() || self.description.is_some()
    }

    /// Convert into a result for the given show
    pub fn into_summary(self, show_name: &str) -> EpisodeSummary {
        let status = if self.title.is_some() && self.description.is_some() {
            ExtractionStatus::Success
        } else {
            ExtractionStatus::PartialSuccess
        };
        EpisodeSummary::from_fields(
            show_name,
            self.title,
            self.description,
            self.air_date,
            status,
            self.source,
        )
    }
}

/// Trim and discard empty strings.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Strategies that only need the parsed document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStrategy {
    /// JSON-LD blocks
    StructuredMarkup,
    /// Key/value literals in inline scripts
    ScriptPattern,
    /// `<meta>` tags and the `<title>` element
    MetaTags,
}

/// Document strategies in priority order
pub const DOCUMENT_STRATEGIES: [DocumentStrategy; 3] = [
    DocumentStrategy::StructuredMarkup,
    DocumentStrategy::ScriptPattern,
    DocumentStrategy::MetaTags,
];

impl DocumentStrategy {
    /// Source label reported when this strategy wins
    pub fn source(self) -> &'static str {
        match self {
            DocumentStrategy::StructuredMarkup => SOURCE_STRUCTURED,
            DocumentStrategy::ScriptPattern => SOURCE_SCRIPT,
            DocumentStrategy::MetaTags => SOURCE_META,
        }
    }

    /// Run this strategy against a parsed page
    pub fn try_extract(self, document: &Html) -> Option<Candidate> {
        let candidate = match self {
            DocumentStrategy::StructuredMarkup => structured::extract(document),
            DocumentStrategy::ScriptPattern => script::extract(document),
            DocumentStrategy::MetaTags => meta::extract(document),
        };
        candidate.filter(Candidate::is_usable)
    }
}

/// Run the document strategies over raw HTML.
///
/// Pure function of its input: the same HTML always yields the same
/// candidate.
pub fn extract_from_document(html: &str) -> Option<Candidate> {
    let document = Html::parse_document(html);

    DOCUMENT_STRATEGIES.iter().find_map(|strategy| {
        let candidate = strategy.try_extract(&document);
        if candidate.is_none() {
            debug!(strategy = strategy.source(), "strategy found nothing");
        }
        candidate
    })
}

/// Runs the full chain, including the derived-API probe
#[derive(Debug, Clone)]
pub struct StaticExtractor {
    client: FetchClient,
    probe_paths: Vec<String>,
}

impl StaticExtractor {
    /// Create an extractor that probes with the given client
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            probe_paths: DEFAULT_PROBE_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Replace the endpoint templates tried by the probe.
    ///
    /// Each template is a path on the page's origin with `{id}` standing in
    /// for the trailing numeric identifier.
    pub fn with_probe_paths(mut self, paths: Vec<String>) -> Self {
        self.probe_paths = paths;
        self
    }

    /// Extract the latest-episode summary from a fetched page.
    ///
    /// Never fails: an exhausted chain yields a `LimitedData` result.
    pub async fn extract(&self, html: &str, target: &Target) -> EpisodeSummary {
        if let Some(candidate) = extract_from_document(html) {
            info!(show = %target.show_name, source = candidate.source, "extracted from page");
            return candidate.into_summary(&target.show_name);
        }

        let paths = self.probe_paths.as_slice();
        if let Some(candidate) = probe::probe(&self.client, target, paths).await {
            info!(show = %target.show_name, source = candidate.source, "extracted from api");
            return candidate.into_summary(&target.show_name);
        }

        info!(show = %target.show_name, "static strategies exhausted");
        EpisodeSummary::limited(&target.show_name, SOURCE_NONE)
    }
}
