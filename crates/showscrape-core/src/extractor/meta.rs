//! Meta-tag strategy
//!
//! Coarse fallback over `<meta>` tags. Each logical field has a priority list
//! of tag keys; a tag key is read from either the `property` or the `name`
//! attribute. A missing title falls back to the `<title>` element.

use std::collections::HashMap;

use scraper::{Html, Selector};

use super::{Candidate, SOURCE_META};

const TITLE_TAGS: [&str; 2] = ["og:title", "twitter:title"];
const DESCRIPTION_TAGS: [&str; 2] = ["description", "og:description"];
const DATE_TAGS: [&str; 2] = ["og:updated_time", "article:published_time"];

/// Run the meta-tag strategy.
pub fn extract(document: &Html) -> Option<Candidate> {
    let tags = collect_meta(document);

    let title = lookup(&tags, &TITLE_TAGS).or_else(|| title_element(document));
    let description = lookup(&tags, &DESCRIPTION_TAGS);
    let air_date = lookup(&tags, &DATE_TAGS);

    let candidate = Candidate::new(title, description, air_date, SOURCE_META);
    candidate.is_usable().then_some(candidate)
}

/// Map of lower-cased meta key to the first non-empty content seen for it.
fn collect_meta(document: &Html) -> HashMap<String, String> {
    let mut tags = HashMap::new();
    let Ok(selector) = Selector::parse("meta[content]") else {
        return tags;
    };

    for meta in document.select(&selector) {
        let element = meta.value();
        let Some(key) = element.attr("property").or_else(|| element.attr("name")) else {
            continue;
        };
        let content = element.attr("content").unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        tags.entry(key.trim().to_ascii_lowercase())
            .or_insert_with(|| content.to_string());
    }

    tags
}

fn lookup(tags: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| tags.get(*key).cloned())
}

fn title_element(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> Option<Candidate> {
        extract(&Html::parse_document(html))
    }

    #[test]
    fn test_priority_order() {
        let candidate = run(
            r#"<head>
                <meta name="twitter:title" content="Twitter Title">
                <meta property="og:title" content="OG Title">
                <meta property="og:description" content="OG Desc">
                <meta name="description" content="Plain Desc">
                <meta property="article:published_time" content="2024-10-10">
                <meta property="og:updated_time" content="2024-10-12">
            </head>"#,
        )
        .unwrap();
        assert_eq!(candidate.title.as_deref(), Some("OG Title"));
        assert_eq!(candidate.description.as_deref(), Some("Plain Desc"));
        assert_eq!(candidate.air_date.as_deref(), Some("2024-10-12"));
        assert_eq!(candidate.source, SOURCE_META);
    }

    #[test]
    fn test_title_element_fallback() {
        let candidate = run("<head><title> Watch Show </title></head>").unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Watch Show"));
        assert_eq!(candidate.description, None);
    }

    #[test]
    fn test_meta_title_beats_title_element() {
        let candidate = run(
            r#"<head><title>Page</title><meta name="twitter:title" content="Card"></head>"#,
        )
        .unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Card"));
    }

    #[test]
    fn test_skips_empty_content() {
        let candidate = run(
            r#"<head>
                <meta name="description" content="  ">
                <meta property="og:description" content="Real">
            </head>"#,
        )
        .unwrap();
        assert_eq!(candidate.description.as_deref(), Some("Real"));
    }

    #[test]
    fn test_date_alone_is_not_usable() {
        assert_eq!(
            run(r#"<head><meta property="og:updated_time" content="2024-10-12"></head>"#),
            None
        );
    }

    #[test]
    fn test_no_tags() {
        assert_eq!(run("<html><body></body></html>"), None);
    }
}
