//! Target descriptor
//!
//! Pure helpers that interpret a show page URL: the human-readable show
//! name and the trailing numeric content identifier.

use url::Url;

use crate::error::{Result, ScrapeError};

/// Name used when a URL carries no `shows/<slug>/` segment
pub const UNKNOWN_SHOW: &str = "Unknown Show";

/// Path marker preceding the show slug
const SHOWS_MARKER: &str = "shows/";

/// One show page to extract from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Page URL as configured
    pub url: String,
    /// Name derived from the URL
    pub show_name: String,
}

impl Target {
    /// Create a target, deriving its show name
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let show_name = derive_show_name(&url);
        Self { url, show_name }
    }

    /// Trailing numeric identifier of the page, if any
    pub fn content_id(&self) -> Option<&str> {
        extract_content_id(&self.url)
    }

    /// Slug between `shows/` and the next `/`
    pub fn slug(&self) -> Option<&str> {
        extract_slug(&self.url)
    }

    /// Parse the page URL, accepting only `http` and `https`.
    ///
    /// # Errors
    /// Returns `ScrapeError::InvalidUrl` if the URL does not parse or uses
    /// another scheme
    pub fn parsed_url(&self) -> Result<Url> {
        let parsed = Url::parse(&self.url)
            .map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", self.url, e)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            scheme => Err(ScrapeError::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                self.url, scheme
            ))),
        }
    }

    /// Scheme, host and port of the page URL
    pub fn origin(&self) -> Option<String> {
        let parsed = self.parsed_url().ok()?;
        Some(parsed.origin().ascii_serialization())
    }
}

/// Derive a display name from a show page URL.
///
/// Takes the segment after `shows/` up to the next `/`, splits it on `-`
/// and capitalizes each word. Never fails: URLs without that segment yield
/// [`UNKNOWN_SHOW`].
///
/// # Examples
/// ```
/// use showscrape_core::target::derive_show_name;
///
/// assert_eq!(
///     derive_show_name("https://www.hotstar.com/in/shows/pandian-stores-2/1260000603"),
///     "Pandian Stores 2"
/// );
/// assert_eq!(derive_show_name("not a url"), "Unknown Show");
/// ```
pub fn derive_show_name(url: &str) -> String {
    let Some(slug) = extract_slug(url) else {
        return UNKNOWN_SHOW.to_string();
    };

    let name = slug
        .split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if name.trim().is_empty() {
        UNKNOWN_SHOW.to_string()
    } else {
        name
    }
}

/// Slug between the `shows/` marker and the following `/`.
fn extract_slug(url: &str) -> Option<&str> {
    let start = url.find(SHOWS_MARKER)? + SHOWS_MARKER.len();
    let rest = &url[start..];
    let end = rest.find('/')?;
    let slug = &rest[..end];
    (!slug.is_empty()).then_some(slug)
}

/// Upper-case the first character, lower-case the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Extract the trailing numeric path segment of a URL.
///
/// Query strings and fragments are ignored, as is a trailing slash.
///
/// # Examples
/// ```
/// use showscrape_core::target::extract_content_id;
///
/// assert_eq!(extract_content_id("https://x.com/in/shows/a-b/1260000603"), Some("1260000603"));
/// assert_eq!(extract_content_id("https://x.com/in/shows/a-b/"), None);
/// ```
pub fn extract_content_id(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    let last = path.trim_end_matches('/').rsplit('/').next()?;

    if !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()) {
        Some(last)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_derive_show_name_standard() {
        assert_eq!(
            derive_show_name("https://www.hotstar.com/in/shows/ayyanar-thunai/1271388570"),
            "Ayyanar Thunai"
        );
        assert_eq!(
            derive_show_name("https://www.hotstar.com/in/shows/baakiyalakshmi/1260022970"),
            "Baakiyalakshmi"
        );
    }

    #[test]
    fn test_derive_show_name_lowercases_tail() {
        assert_eq!(derive_show_name("https://x.com/shows/THE-office/1"), "The Office");
    }

    #[test]
    fn test_derive_show_name_requires_closing_slash() {
        assert_eq!(derive_show_name("https://x.com/shows/dangling"), UNKNOWN_SHOW);
    }

    #[test]
    fn test_derive_show_name_malformed() {
        assert_eq!(derive_show_name(""), UNKNOWN_SHOW);
        assert_eq!(derive_show_name("https://x.com/movies/foo/1"), UNKNOWN_SHOW);
        assert_eq!(derive_show_name("https://x.com/shows//1"), UNKNOWN_SHOW);
        assert_eq!(derive_show_name("https://x.com/shows/---/1"), UNKNOWN_SHOW);
    }

    #[test]
    fn test_derive_show_name_skips_empty_words() {
        assert_eq!(derive_show_name("https://x.com/shows/big--boss/1"), "Big Boss");
    }

    #[test]
    fn test_extract_content_id() {
        assert_eq!(extract_content_id("https://x.com/shows/a/1260000603"), Some("1260000603"));
        assert_eq!(extract_content_id("https://x.com/shows/a/1260000603/"), Some("1260000603"));
        assert_eq!(extract_content_id("https://x.com/shows/a/42?ref=home"), Some("42"));
        assert_eq!(extract_content_id("https://x.com/shows/a/watch"), None);
        assert_eq!(extract_content_id("https://x.com/shows/a/12ab"), None);
        assert_eq!(extract_content_id(""), None);
    }

    #[test]
    fn test_target_origin_and_slug() {
        let target = Target::new("http://127.0.0.1:8080/in/shows/pandian-stores-2/1260000603");
        assert_eq!(target.origin().as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(target.slug(), Some("pandian-stores-2"));
        assert_eq!(target.content_id(), Some("1260000603"));
        assert_eq!(target.show_name, "Pandian Stores 2");
    }

    #[test]
    fn test_target_origin_invalid() {
        assert_eq!(Target::new("nonsense").origin(), None);
        assert_eq!(Target::new("file:///in/shows/a/1").origin(), None);
    }

    #[test]
    fn test_parsed_url_rejects_non_http() {
        assert!(Target::new("https://x.com/in/shows/a/1").parsed_url().is_ok());
        assert!(matches!(
            Target::new("nonsense").parsed_url(),
            Err(ScrapeError::InvalidUrl(_))
        ));
        match Target::new("ftp://x.com/in/shows/a/1").parsed_url() {
            Err(ScrapeError::InvalidUrl(msg)) => assert!(msg.contains("unsupported scheme ftp")),
            other => panic!("Expected InvalidUrl, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn prop_derive_show_name_never_empty(url in ".*") {
            let name = derive_show_name(&url);
            prop_assert!(!name.trim().is_empty());
        }

        #[test]
        fn prop_derive_show_name_from_slug(words in prop::collection::vec("[a-z0-9]{1,8}", 1..5)) {
            let url = format!("https://x.com/in/shows/{}/123", words.join("-"));
            let name = derive_show_name(&url);
            prop_assert_eq!(name.split(' ').count(), words.len());
        }
    }
}
