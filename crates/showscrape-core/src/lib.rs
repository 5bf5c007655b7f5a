//! Latest-episode extraction for video show pages
//!
//! Show pages render their episode lists client-side, so this crate works
//! down a ladder of techniques:
//!
//! # Features
//! - Static fetch with browser-like headers
//! - Strategy chain over the static HTML: JSON-LD, inline-script literals,
//!   meta tags, then guessed content-API endpoints
//! - Headless Chrome rendering with an isolated, single-use profile
//! - Sequential batch runs with a fixed pause between pages

pub mod batch;
pub mod client;
pub mod error;
pub mod extractor;
pub mod render;
pub mod scraper;
pub mod target;
pub mod types;

// Re-export main types for convenience
pub use batch::{BatchOrchestrator, EpisodeSource, RenderSource, StaticSource};
pub use client::{ClientConfig, FetchClient};
pub use error::{Result, ScrapeError};
pub use extractor::StaticExtractor;
pub use render::{CardSelectors, RenderConfig, RenderingSession};
pub use scraper::{EpisodeScraper, ExtractionMode, ScraperConfig};
pub use target::{derive_show_name, Target};
pub use types::{BatchResult, BatchSummary, EpisodeSummary, ExtractionStatus};
