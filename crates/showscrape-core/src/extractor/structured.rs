//! JSON-LD structured data strategy
//!
//! Reads every `<script type="application/ld+json">` block in document order.
//! Malformed blocks are skipped.

use scraper::{Html, Selector};
use serde_json::{Map, Value};
use tracing::debug;

use super::{Candidate, SOURCE_STRUCTURED};

/// Keys holding an entity title, in preference order
const TITLE_KEYS: [&str; 3] = ["name", "title", "headline"];
/// Keys holding an entity description
const DESCRIPTION_KEYS: [&str; 2] = ["description", "synopsis"];
/// Keys holding a publication date
const DATE_KEYS: [&str; 5] = [
    "datePublished",
    "uploadDate",
    "releaseDate",
    "dateCreated",
    "startDate",
];

/// Run the structured-markup strategy.
pub fn extract(document: &Html) -> Option<Candidate> {
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;

    document.select(&selector).find_map(|script| {
        let raw = script.text().collect::<String>();
        let content = raw
            .trim()
            .trim_start_matches("<![CDATA[")
            .trim_end_matches("]]>")
            .trim();

        match serde_json::from_str::<Value>(content) {
            Ok(value) => fields_from_block(&value),
            Err(e) => {
                debug!(error = %e, "skipping malformed structured data block");
                None
            }
        }
    })
}

/// Find the first entity in a JSON-LD block that names an episode.
///
/// Top-level arrays and `@graph` members are searched in order.
fn fields_from_block(value: &Value) -> Option<Candidate> {
    match value {
        Value::Array(items) => items.iter().find_map(fields_from_block),
        Value::Object(object) => entity_fields(object, SOURCE_STRUCTURED).or_else(|| {
            object
                .get("@graph")
                .and_then(fields_from_block)
        }),
        _ => None,
    }
}

/// Read title, description and date from one JSON object.
///
/// Returns `None` unless a non-empty title or description is present.
pub(crate) fn entity_fields(object: &Map<String, Value>, source: &'static str) -> Option<Candidate> {
    let candidate = Candidate::new(
        first_string(object, &TITLE_KEYS),
        first_string(object, &DESCRIPTION_KEYS),
        first_string(object, &DATE_KEYS),
        source,
    );
    candidate.is_usable().then_some(candidate)
}

fn first_string(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> Option<Candidate> {
        extract(&Html::parse_document(html))
    }

    #[test]
    fn test_plain_object() {
        let candidate = run(
            r#"<script type="application/ld+json">{"@type":"TVEpisode","name":"Ep 1","description":"Desc","datePublished":"2024-10-01"}</script>"#,
        )
        .unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Ep 1"));
        assert_eq!(candidate.description.as_deref(), Some("Desc"));
        assert_eq!(candidate.air_date.as_deref(), Some("2024-10-01"));
        assert_eq!(candidate.source, SOURCE_STRUCTURED);
    }

    #[test]
    fn test_graph_members() {
        let candidate = run(
            r#"<script type="application/ld+json">{"@context":"https://schema.org","@graph":[{"@type":"WebSite"},{"@type":"TVEpisode","headline":"Ep 9"}]}</script>"#,
        )
        .unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Ep 9"));
        assert_eq!(candidate.description, None);
    }

    #[test]
    fn test_top_level_array() {
        let candidate = run(
            r#"<script type="application/ld+json">[{"@type":"BreadcrumbList"},{"description":"Only desc"}]</script>"#,
        )
        .unwrap();
        assert_eq!(candidate.description.as_deref(), Some("Only desc"));
    }

    #[test]
    fn test_skips_malformed_block() {
        let candidate = run(
            r#"
            <script type="application/ld+json">{"name": </script>
            <script type="application/ld+json">{"name":"Second"}</script>
            "#,
        )
        .unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Second"));
    }

    #[test]
    fn test_ignores_non_string_fields() {
        assert_eq!(
            run(r#"<script type="application/ld+json">{"name":42,"description":""}</script>"#),
            None
        );
    }

    #[test]
    fn test_cdata_wrapper() {
        let candidate = run(
            r#"<script type="application/ld+json"><![CDATA[{"title":"Wrapped"}]]></script>"#,
        )
        .unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Wrapped"));
    }

    #[test]
    fn test_no_blocks() {
        assert_eq!(run("<html><head></head></html>"), None);
    }
}
