//! Data types for the episode scraper
//!
//! All types implement Serialize and Deserialize so the server crate can
//! return them as JSON unchanged.

use serde::{Deserialize, Serialize};

/// Placeholder used when no title could be recovered
pub const TITLE_PLACEHOLDER: &str = "Title not found";
/// Placeholder used when no description could be recovered
pub const DESCRIPTION_PLACEHOLDER: &str = "Description not available";
/// Placeholder used when no air date could be recovered
pub const DATE_PLACEHOLDER: &str = "Date not available";
/// Description carried by a result when every static strategy came up empty
pub const RENDERING_REQUIRED_NOTE: &str =
    "No episode data in the static page; dynamic rendering may be required";

/// Outcome classification of one target's extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    /// Every field was recovered
    Success,
    /// Some fields are placeholders
    PartialSuccess,
    /// The page gave too little to work with
    LimitedData,
    /// The target could not be fetched or rendered
    Error,
}

/// Summary of the most recent episode of one show
///
/// `status == Error` exactly when `error` is set. Every other status carries
/// best-effort values, with placeholders standing in for missing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Episode title
    pub title: String,
    /// Episode synopsis
    pub description: String,
    /// Air date as displayed by the source
    #[serde(rename = "date")]
    pub air_date: String,
    /// Show name derived from the target URL
    #[serde(rename = "name")]
    pub show_name: String,
    /// Outcome classification
    pub status: ExtractionStatus,
    /// Which strategy produced the values
    pub source: String,
    /// Human-readable failure message, only for `Error` results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EpisodeSummary {
    /// Build a non-error summary, substituting placeholders for missing fields.
    pub fn from_fields(
        show_name: impl Into<String>,
        title: Option<String>,
        description: Option<String>,
        air_date: Option<String>,
        status: ExtractionStatus,
        source: impl Into<String>,
    ) -> Self {
        debug_assert!(status != ExtractionStatus::Error);
        Self {
            title: title.unwrap_or_else(|| TITLE_PLACEHOLDER.to_string()),
            description: description.unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string()),
            air_date: air_date.unwrap_or_else(|| DATE_PLACEHOLDER.to_string()),
            show_name: show_name.into(),
            status,
            source: source.into(),
            error: None,
        }
    }

    /// Result for a static page where no strategy found anything.
    pub fn limited(show_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: TITLE_PLACEHOLDER.to_string(),
            description: RENDERING_REQUIRED_NOTE.to_string(),
            air_date: DATE_PLACEHOLDER.to_string(),
            show_name: show_name.into(),
            status: ExtractionStatus::LimitedData,
            source: source.into(),
            error: None,
        }
    }

    /// Result for a target whose extraction failed outright.
    pub fn error(
        show_name: impl Into<String>,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            title: TITLE_PLACEHOLDER.to_string(),
            description: DESCRIPTION_PLACEHOLDER.to_string(),
            air_date: DATE_PLACEHOLDER.to_string(),
            show_name: show_name.into(),
            status: ExtractionStatus::Error,
            source: source.into(),
            error: Some(message.into()),
        }
    }

    /// Whether this result reports a failure
    pub fn is_error(&self) -> bool {
        self.status == ExtractionStatus::Error
    }
}

/// Aggregate counts over one batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Number of targets in the input list
    pub total_requested: usize,
    /// Results with `Success` status
    pub successful: usize,
    /// Results with `PartialSuccess` or `LimitedData` status
    pub partial: usize,
    /// Results with `Error` status
    pub failed: usize,
}

impl BatchSummary {
    /// Count statuses across a result list
    pub fn from_results(results: &[EpisodeSummary]) -> Self {
        results.iter().fold(
            Self {
                total_requested: results.len(),
                ..Self::default()
            },
            |mut summary, result| {
                match result.status {
                    ExtractionStatus::Success => summary.successful += 1,
                    ExtractionStatus::PartialSuccess | ExtractionStatus::LimitedData => {
                        summary.partial += 1
                    }
                    ExtractionStatus::Error => summary.failed += 1,
                }
                summary
            },
        )
    }
}

/// Ordered results of one batch run, one per input target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Per-target results in input order
    pub results: Vec<EpisodeSummary>,
    /// Status counts
    pub summary: BatchSummary,
}

impl BatchResult {
    /// Wrap results and compute their summary
    pub fn new(results: Vec<EpisodeSummary>) -> Self {
        let summary = BatchSummary::from_results(&results);
        Self { results, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ExtractionStatus::PartialSuccess).unwrap();
        assert_eq!(json, "\"partial_success\"");

        let json = serde_json::to_string(&ExtractionStatus::LimitedData).unwrap();
        assert_eq!(json, "\"limited_data\"");
    }

    #[test]
    fn test_summary_field_names() {
        let summary = EpisodeSummary::from_fields(
            "Baakiyalakshmi",
            Some("Episode 10".to_string()),
            None,
            Some("12 Oct".to_string()),
            ExtractionStatus::PartialSuccess,
            "rendered-dom",
        );

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["title"], "Episode 10");
        assert_eq!(value["description"], DESCRIPTION_PLACEHOLDER);
        assert_eq!(value["date"], "12 Oct");
        assert_eq!(value["name"], "Baakiyalakshmi");
        assert_eq!(value["status"], "partial_success");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_carries_message() {
        let summary = EpisodeSummary::error("Pandian Stores 2", "static-fetch", "connection refused");
        assert!(summary.is_error());
        assert_eq!(summary.error.as_deref(), Some("connection refused"));

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["error"], "connection refused");
        assert_eq!(value["name"], "Pandian Stores 2");
    }

    #[test]
    fn test_limited_has_no_error() {
        let summary = EpisodeSummary::limited("Show", "static-exhausted");
        assert_eq!(summary.status, ExtractionStatus::LimitedData);
        assert!(summary.error.is_none());
        assert_eq!(summary.description, RENDERING_REQUIRED_NOTE);
    }

    #[test]
    fn test_batch_summary_counts() {
        let results = vec![
            EpisodeSummary::from_fields("A", None, None, None, ExtractionStatus::Success, "x"),
            EpisodeSummary::limited("B", "x"),
            EpisodeSummary::from_fields("C", None, None, None, ExtractionStatus::PartialSuccess, "x"),
            EpisodeSummary::error("D", "x", "boom"),
        ];
        let batch = BatchResult::new(results);

        assert_eq!(batch.summary.total_requested, 4);
        assert_eq!(batch.summary.successful, 1);
        assert_eq!(batch.summary.partial, 2);
        assert_eq!(batch.summary.failed, 1);

        let value = serde_json::to_value(&batch.summary).unwrap();
        assert_eq!(value["totalRequested"], 4);
    }

    #[test]
    fn test_batch_summary_empty() {
        let batch = BatchResult::new(Vec::new());
        assert_eq!(batch.summary, BatchSummary::default());
    }
}
