//! Route handlers and the JSON error envelope

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::{error, info};

use showscrape_core::{BatchResult, EpisodeSummary};

use crate::AppState;

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Human-readable failure description
    pub error: &'static str,
}

/// Service-level failures
#[derive(Debug)]
pub enum ApiError {
    /// No route matched
    NotFound,
    /// Internal state was inconsistent
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorEnvelope { error: "Not found" }),
            )
                .into_response(),
            ApiError::Internal(detail) => {
                error!(%detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorEnvelope {
                        error: "Internal server error",
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Scrape every configured show.
///
/// Always 200 with one result per configured target; per-show failures
/// are reported inside the results.
pub async fn scrape_all(State(state): State<AppState>) -> Result<Json<BatchResult>, ApiError> {
    let targets = state.targets();
    info!(targets = targets.len(), "batch requested");

    let batch = state.scraper().scrape_all(targets).await;
    if batch.results.len() != targets.len() {
        return Err(ApiError::Internal(format!(
            "expected {} results, got {}",
            targets.len(),
            batch.results.len()
        )));
    }

    Ok(Json(batch))
}

/// Scrape a single show addressed by slug and content id.
pub async fn scrape_show(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
) -> Json<EpisodeSummary> {
    let url = state.show_url(&slug, &id);
    info!(%url, "single show requested");
    Json(state.scraper().scrape_one(&url).await)
}

/// Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
