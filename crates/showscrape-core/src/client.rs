//! HTTP client for static page fetches
//!
//! One pooled `reqwest` client is shared by every target in a run. It sends
//! browser-like headers and enforces a hard timeout; it never retries. It
//! keeps no cookie store, so no response state carries over to the next
//! target.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use tracing::debug;

use crate::error::{Result, ScrapeError};

/// Default User-Agent mimicking a desktop browser
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default Accept header for page fetches
const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Default Accept-Language header
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Configuration for the fetch client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Page request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Timeout for each derived-API probe in seconds (default: 5)
    pub probe_timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Accept-Language header sent with every request
    pub accept_language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            probe_timeout_secs: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Probe timeout as Duration
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// Pooled HTTP client with browser-like headers
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: reqwest::Client,
    probe_timeout: Duration,
}

impl FetchClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if a header value is invalid or the HTTP client
    /// cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .map_err(|e| ScrapeError::Parse(format!("Invalid Accept-Language: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            probe_timeout: config.probe_timeout(),
        })
    }

    /// Fetch a page body as text.
    ///
    /// # Errors
    /// - `ScrapeError::Http` - transport failure or timeout
    /// - `ScrapeError::Status` - non-success response status
    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetch and decode a JSON document using the short probe timeout.
    ///
    /// # Errors
    /// - `ScrapeError::Http` - transport failure or timeout
    /// - `ScrapeError::Status` - non-success response status
    /// - `ScrapeError::Parse` - body is not JSON
    pub async fn fetch_json(&self, url: &str) -> Result<serde_json::Value> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .timeout(self.probe_timeout)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ScrapeError::Parse(e.to_string()))
    }
}
