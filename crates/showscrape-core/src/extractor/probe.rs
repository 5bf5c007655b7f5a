//! Derived-API probe
//!
//! Last resort of the static chain. The trailing numeric identifier of the
//! page URL is substituted into a short list of guessed content-detail
//! endpoints on the same origin. Each endpoint fails independently; the
//! first JSON response that names an episode wins.

use serde_json::Value;
use tracing::{debug, warn};

use super::structured::entity_fields;
use super::{Candidate, SOURCE_API};
use crate::client::FetchClient;
use crate::target::Target;

/// Endpoint templates tried in order; `{id}` is the content identifier.
///
/// These are guesses at the site's content API, not a published contract.
pub const DEFAULT_PROBE_PATHS: [&str; 3] = [
    "/api/v1/content/{id}",
    "/api/content/detail?contentId={id}",
    "/api/internal/content/{id}",
];

/// Envelope keys commonly wrapping the payload of an API response
const WRAPPER_KEYS: [&str; 5] = ["body", "data", "result", "content", "item"];

/// How many envelope levels to look through
const MAX_DEPTH: usize = 3;

/// Build the probe URLs for a target.
///
/// Returns an empty list when the URL has no origin or no trailing
/// numeric identifier.
pub fn build_probe_urls<S: AsRef<str>>(target: &Target, paths: &[S]) -> Vec<String> {
    let (Some(origin), Some(id)) = (target.origin(), target.content_id()) else {
        return Vec::new();
    };

    paths
        .iter()
        .map(|path| format!("{}{}", origin, path.as_ref().replace("{id}", id)))
        .collect()
}

/// Try each endpoint in order and return the first usable candidate.
pub async fn probe<S: AsRef<str>>(
    client: &FetchClient,
    target: &Target,
    paths: &[S],
) -> Option<Candidate> {
    let urls = build_probe_urls(target, paths);
    if urls.is_empty() {
        debug!(url = %target.url, "no content identifier to probe with");
        return None;
    }

    for url in urls {
        match client.fetch_json(&url).await {
            Ok(value) => {
                if let Some(candidate) = find_episode_fields(&value, MAX_DEPTH) {
                    return Some(candidate);
                }
                debug!(%url, "probe response had no episode fields");
            }
            Err(e) => warn!(%url, error = %e, "probe endpoint failed"),
        }
    }

    None
}

/// Search a JSON response for an object carrying a title or description.
fn find_episode_fields(value: &Value, depth: usize) -> Option<Candidate> {
    match value {
        Value::Object(object) => entity_fields(object, SOURCE_API).or_else(|| {
            if depth == 0 {
                return None;
            }
            WRAPPER_KEYS
                .iter()
                .filter_map(|key| object.get(*key))
                .find_map(|inner| find_episode_fields(inner, depth - 1))
        }),
        Value::Array(items) if depth > 0 => items
            .iter()
            .find_map(|item| find_episode_fields(item, depth - 1)),
        _ => None,
    }
}
