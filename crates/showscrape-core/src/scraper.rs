//! Main scraper API
//!
//! Combines the configured extraction path with the batch orchestrator
//! behind a small interface: scrape one show page, or a list of them.

use std::str::FromStr;
use std::time::Duration;

use crate::batch::{BatchOrchestrator, EpisodeSource, RenderSource, StaticSource};
use crate::client::{ClientConfig, FetchClient};
use crate::error::{Result, ScrapeError};
use crate::render::RenderConfig;
use crate::types::{BatchResult, EpisodeSummary};

/// Which extraction path a scraper uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    /// Fetch static HTML and run the strategy chain
    Static,
    /// Render each page in headless Chrome
    #[default]
    Render,
}

impl FromStr for ExtractionMode {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(ExtractionMode::Static),
            "render" | "rendering" | "browser" => Ok(ExtractionMode::Render),
            other => Err(ScrapeError::Parse(format!("Unknown extraction mode: {}", other))),
        }
    }
}

/// Configuration for [`EpisodeScraper`]
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Extraction path (default: render)
    pub mode: ExtractionMode,
    /// Pause between consecutive targets in milliseconds (default: 1500)
    pub request_delay_millis: u64,
    /// Static fetch settings
    pub client: ClientConfig,
    /// Rendering session settings
    pub render: RenderConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            mode: ExtractionMode::default(),
            request_delay_millis: 1500,
            client: ClientConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl ScraperConfig {
    /// Inter-target pause as Duration
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_millis)
    }
}

/// Latest-episode scraper
///
/// # Example
/// ```no_run
/// use showscrape_core::EpisodeScraper;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = EpisodeScraper::new()?;
///     let batch = scraper
///         .scrape_all(&["https://www.hotstar.com/in/shows/pandian-stores-2/1260000603"])
///         .await;
///     println!("{} succeeded", batch.summary.successful);
///     Ok(())
/// }
/// ```
pub struct EpisodeScraper {
    orchestrator: BatchOrchestrator,
}

impl EpisodeScraper {
    /// Create a new scraper with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(ScraperConfig::default())
    }

    /// Create a new scraper with custom configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(config: ScraperConfig) -> Result<Self> {
        let source: Box<dyn EpisodeSource> = match config.mode {
            ExtractionMode::Static => {
                Box::new(StaticSource::new(FetchClient::with_config(config.client.clone())?))
            }
            ExtractionMode::Render => Box::new(RenderSource::new(config.render.clone())),
        };
        Ok(Self::with_source(source, config.request_delay()))
    }

    /// Create a scraper over a custom extraction path.
    ///
    /// This is useful for testing or for plugging in another source.
    pub fn with_source(source: Box<dyn EpisodeSource>, delay: Duration) -> Self {
        Self {
            orchestrator: BatchOrchestrator::new(source, delay),
        }
    }

    /// Scrape a single show page.
    ///
    /// Never fails: errors are reported in the returned summary.
    pub async fn scrape_one(&self, url: &str) -> EpisodeSummary {
        self.orchestrator.run_one(url).await
    }

    /// Scrape every show page in order, pausing between pages.
    pub async fn scrape_all<S: AsRef<str>>(&self, urls: &[S]) -> BatchResult {
        self.orchestrator.run_batch(urls).await
    }
}
