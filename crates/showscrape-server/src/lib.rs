//! HTTP front end for the episode scraper
//!
//! Exposes the scraper over a small JSON API:
//! - `GET /scrape` - latest episode of every configured show
//! - `GET /scrape/{slug}/{id}` - latest episode of one show (debug surface)
//! - `GET /health` - liveness
//!
//! Unknown routes answer with a fixed 404 envelope.

pub mod config;
pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use showscrape_core::EpisodeScraper;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    scraper: Arc<EpisodeScraper>,
    targets: Arc<Vec<String>>,
    show_base_url: Arc<str>,
}

impl AppState {
    /// Bundle a scraper with the show list it serves.
    ///
    /// `show_base_url` is the URL prefix the single-show route appends
    /// `/{slug}/{id}` to.
    pub fn new(scraper: EpisodeScraper, targets: Vec<String>, show_base_url: &str) -> Self {
        Self {
            scraper: Arc::new(scraper),
            targets: Arc::new(targets),
            show_base_url: Arc::from(show_base_url.trim_end_matches('/')),
        }
    }

    /// The scraper shared by all requests
    pub fn scraper(&self) -> &EpisodeScraper {
        &self.scraper
    }

    /// Configured show URLs, in output order
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Page URL for a show slug and content id
    pub fn show_url(&self, slug: &str, id: &str) -> String {
        format!("{}/{}/{}", self.show_base_url, slug, id)
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/scrape", get(handlers::scrape_all))
        .route("/scrape/:slug/:id", get(handlers::scrape_show))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
