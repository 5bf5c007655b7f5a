//! Inline-script literal strategy
//!
//! Pages that hydrate client-side often embed their initial state as a JS
//! object literal. This strategy scans every non-JSON-LD script body for a
//! few `"key": "value"` pairs and keeps the first match of each key.

use regex_lite::Regex;
use scraper::{Html, Selector};

use super::{Candidate, SOURCE_SCRIPT};

/// Keys scanned for, grouped by the field they feed
const TITLE_KEYS: [&str; 2] = ["title", "name"];
const DESCRIPTION_KEYS: [&str; 2] = ["description", "synopsis"];
const DATE_KEYS: [&str; 2] = ["releaseDate", "publishedTime"];

/// Build the pattern for one key: optional quotes around the key, then a
/// double-quoted value with escapes.
fn key_pattern(key: &str) -> Option<Regex> {
    Regex::new(&format!(
        r#"(?:^|[^A-Za-z0-9_$])["']?{}["']?\s*:\s*"((?:[^"\\]|\\.)*)""#,
        key
    ))
    .ok()
}

/// Run the inline-script strategy.
pub fn extract(document: &Html) -> Option<Candidate> {
    let selector = Selector::parse("script").ok()?;

    let bodies: Vec<String> = document
        .select(&selector)
        .filter(|script| {
            script
                .value()
                .attr("type")
                .map_or(true, |t| !t.eq_ignore_ascii_case("application/ld+json"))
        })
        .map(|script| script.text().collect::<String>())
        .filter(|body| !body.trim().is_empty())
        .collect();

    if bodies.is_empty() {
        return None;
    }

    let title = first_match(&bodies, &TITLE_KEYS);
    let description = first_match(&bodies, &DESCRIPTION_KEYS);
    let air_date = first_match(&bodies, &DATE_KEYS);

    let candidate = Candidate::new(title, description, air_date, SOURCE_SCRIPT);
    candidate.is_usable().then_some(candidate)
}

/// First non-empty value among `keys`, trying keys in order and scripts in
/// document order for each key.
fn first_match(bodies: &[String], keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        let pattern = key_pattern(key)?;
        bodies.iter().find_map(|body| {
            pattern
                .captures_iter(body)
                .filter_map(|caps| caps.get(1))
                .map(|m| unescape(m.as_str()))
                .find(|value| !value.trim().is_empty())
        })
    })
}

/// Decode JSON string escapes, keeping the raw text when decoding fails.
fn unescape(raw: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{}\"", raw)).unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> Option<Candidate> {
        extract(&Html::parse_document(html))
    }

    #[test]
    fn test_json_state_blob() {
        let candidate = run(
            r#"<script>window.__STATE__={"episode":{"title":"Ep 12","synopsis":"Meena returns.","releaseDate":"14 Oct 2024"}}</script>"#,
        )
        .unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Ep 12"));
        assert_eq!(candidate.description.as_deref(), Some("Meena returns."));
        assert_eq!(candidate.air_date.as_deref(), Some("14 Oct 2024"));
        assert_eq!(candidate.source, SOURCE_SCRIPT);
    }

    #[test]
    fn test_unquoted_keys() {
        let candidate = run(r#"<script>var ep = { name: "Ep 3", description: "Plot" };</script>"#).unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Ep 3"));
        assert_eq!(candidate.description.as_deref(), Some("Plot"));
    }

    #[test]
    fn test_title_preferred_over_name() {
        let candidate = run(r#"<script>{"name":"Channel","title":"Ep 7"}</script>"#).unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Ep 7"));
    }

    #[test]
    fn test_does_not_match_key_suffix() {
        assert_eq!(run(r#"<script>{"subtitle":"nope","filename":"x"}</script>"#), None);
    }

    #[test]
    fn test_escapes_decoded() {
        let candidate = run(r#"<script>{"title":"Say \"hi\"!"}</script>"#).unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Say \"hi\"!"));
    }

    #[test]
    fn test_skips_empty_values() {
        let candidate = run(r#"<script>{"title":"","title":"Real"}</script>"#).unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Real"));
    }

    #[test]
    fn test_ignores_json_ld_blocks() {
        assert_eq!(
            run(r#"<script type="application/ld+json">{"name":"LD"}</script>"#),
            None
        );
    }

    #[test]
    fn test_date_only_is_not_usable() {
        assert_eq!(run(r#"<script>{"publishedTime":"2024-01-01"}</script>"#), None);
    }
}
