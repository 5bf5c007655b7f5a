//! Error types for the episode scraper
//!
//! Every failure that can end a single target's extraction is a variant of
//! [`ScrapeError`]. The batch orchestrator turns these into `Error`-status
//! results, so none of them ever aborts a batch.
//! ScrapeError implements Serialize so it can be embedded in JSON envelopes.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for episode scraping operations
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Transport-level failure: DNS, connection refused, timeout
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    /// The headless browser could not load the page
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// The page did not finish loading in the headless browser
    #[error("Navigation timed out for {0}")]
    NavigationTimeout(String),

    /// Page loaded but the dynamic episode container never appeared
    #[error("Episode cards not found: {0}")]
    ContentNotFound(String),

    /// Browser launch or devtools protocol failure
    #[error("Browser error: {0}")]
    Browser(String),

    /// Malformed document or structured data
    #[error("Failed to parse content: {0}")]
    Parse(String),

    /// Target URL could not be interpreted
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Profile directory allocation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking render task panicked or was cancelled
    #[error("Render task failed: {0}")]
    TaskFailed(String),
}

impl ScrapeError {
    /// Whether this error belongs to the network family (fetch or navigation).
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ScrapeError::Http(_)
                | ScrapeError::Status { .. }
                | ScrapeError::Navigation { .. }
                | ScrapeError::NavigationTimeout(_)
        )
    }
}

/// Serialize ScrapeError as its display string
impl Serialize for ScrapeError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_status() {
        let error = ScrapeError::Status {
            status: 503,
            url: "https://example.com/in/shows/a/1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unexpected HTTP status 503 for https://example.com/in/shows/a/1"
        );
    }

    #[test]
    fn test_display_content_not_found() {
        let error = ScrapeError::ContentNotFound("https://example.com".to_string());
        assert_eq!(error.to_string(), "Episode cards not found: https://example.com");
    }

    #[test]
    fn test_display_navigation_timeout() {
        let error = ScrapeError::NavigationTimeout("https://example.com".to_string());
        assert!(error.to_string().contains("timed out"));
    }

    #[test]
    fn test_network_family() {
        assert!(ScrapeError::NavigationTimeout("u".into()).is_network());
        assert!(ScrapeError::Status { status: 404, url: "u".into() }.is_network());
        assert!(ScrapeError::Navigation { url: "u".into(), reason: "dns".into() }.is_network());
        assert!(!ScrapeError::ContentNotFound("u".into()).is_network());
        assert!(!ScrapeError::Parse("bad json".into()).is_network());
    }

    #[test]
    fn test_serialize_as_string() {
        let error = ScrapeError::Parse("test error".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, "\"Failed to parse content: test error\"");
    }

    #[test]
    fn test_serialize_io_error() {
        let error = ScrapeError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, "\"I/O error: disk full\"");
    }
}
