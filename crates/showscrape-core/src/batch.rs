//! Batch orchestration
//!
//! Targets are processed one at a time, in input order, with a fixed pause
//! between consecutive targets. Any error from the extraction path becomes
//! an `Error` result for that target, so a batch always yields exactly one
//! result per input URL.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::client::FetchClient;
use crate::error::{Result, ScrapeError};
use crate::extractor::StaticExtractor;
use crate::render::{render_episode, RenderConfig};
use crate::target::Target;
use crate::types::{BatchResult, EpisodeSummary};

/// An extraction path for a single target
#[async_trait]
pub trait EpisodeSource: Send + Sync {
    /// Label used as `source` on error results
    fn name(&self) -> &'static str;

    /// Produce the latest-episode summary for one target
    async fn fetch_episode(&self, target: &Target) -> Result<EpisodeSummary>;
}

/// Fetch the static page, then run the strategy chain
pub struct StaticSource {
    client: FetchClient,
    extractor: StaticExtractor,
}

impl StaticSource {
    /// Create a static source sharing one pooled client
    pub fn new(client: FetchClient) -> Self {
        let extractor = StaticExtractor::new(client.clone());
        Self { client, extractor }
    }

    /// Use a custom extractor (e.g. different probe endpoints)
    pub fn with_extractor(client: FetchClient, extractor: StaticExtractor) -> Self {
        Self { client, extractor }
    }
}

#[async_trait]
impl EpisodeSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_episode(&self, target: &Target) -> Result<EpisodeSummary> {
        target.parsed_url()?;
        let html = self.client.fetch(&target.url).await?;
        Ok(self.extractor.extract(&html, target).await)
    }
}

/// Render the page in a headless browser session
pub struct RenderSource {
    config: RenderConfig,
}

impl RenderSource {
    /// Create a rendering source
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EpisodeSource for RenderSource {
    fn name(&self) -> &'static str {
        "render"
    }

    async fn fetch_episode(&self, target: &Target) -> Result<EpisodeSummary> {
        let target = target.clone();
        let config = self.config.clone();

        tokio::task::spawn_blocking(move || render_episode(&target, &config))
            .await
            .map_err(|e| ScrapeError::TaskFailed(e.to_string()))?
    }
}

/// Runs an extraction path over a list of targets
pub struct BatchOrchestrator {
    source: Box<dyn EpisodeSource>,
    delay: Duration,
}

impl BatchOrchestrator {
    /// Create an orchestrator pausing `delay` between targets
    pub fn new(source: Box<dyn EpisodeSource>, delay: Duration) -> Self {
        Self { source, delay }
    }

    /// Pause inserted between consecutive targets
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Extract one target, converting failure into an `Error` result.
    pub async fn run_one(&self, url: &str) -> EpisodeSummary {
        let target = Target::new(url);

        match self.source.fetch_episode(&target).await {
            Ok(summary) => {
                info!(show = %target.show_name, status = ?summary.status, "target done");
                summary
            }
            Err(e) => {
                warn!(show = %target.show_name, url = %target.url, error = %e, "target failed");
                EpisodeSummary::error(&target.show_name, self.source.name(), e.to_string())
            }
        }
    }

    /// Extract every target in order.
    ///
    /// The result list has the same length and order as `urls`.
    pub async fn run_batch<S: AsRef<str>>(&self, urls: &[S]) -> BatchResult {
        let mut results = Vec::with_capacity(urls.len());

        for (index, url) in urls.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            results.push(self.run_one(url.as_ref()).await);
        }

        let batch = BatchResult::new(results);
        info!(
            total = batch.summary.total_requested,
            successful = batch.summary.successful,
            partial = batch.summary.partial,
            failed = batch.summary.failed,
            "batch finished"
        );
        batch
    }
}
