//! Process configuration
//!
//! Command-line flags with environment fallbacks.

use std::path::PathBuf;

use clap::Parser;

use showscrape_core::{ExtractionMode, ScraperConfig};

/// Shows scraped by `GET /scrape` when no targets are configured
pub const DEFAULT_TARGETS: [&str; 3] = [
    "https://www.hotstar.com/in/shows/pandian-stores-2/1260000603",
    "https://www.hotstar.com/in/shows/ayyanar-thunai/1271388570",
    "https://www.hotstar.com/in/shows/baakiyalakshmi/1260022970",
];

/// Serve latest-episode summaries of video shows over HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "showscrape", version, about)]
pub struct ServerArgs {
    /// Interface to bind
    #[arg(long, env = "SHOWSCRAPE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "SHOWSCRAPE_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Extraction path: "render" (headless Chrome) or "static"
    #[arg(short, long, env = "SHOWSCRAPE_MODE", default_value = "render")]
    pub mode: ExtractionMode,

    /// Show page URL; repeat or comma-separate for several
    #[arg(short, long = "target", env = "SHOWSCRAPE_TARGETS", value_delimiter = ',')]
    pub targets: Vec<String>,

    /// URL prefix for `GET /scrape/{slug}/{id}`
    #[arg(long, env = "SHOWSCRAPE_SHOW_BASE_URL", default_value = "https://www.hotstar.com/in/shows")]
    pub show_base_url: String,

    /// Pause between shows in milliseconds
    #[arg(long, env = "SHOWSCRAPE_DELAY_MS", default_value_t = 1500)]
    pub delay_ms: u64,

    /// Chrome binary to launch; auto-detected when unset
    #[arg(long, env = "SHOWSCRAPE_CHROME_PATH")]
    pub chrome_path: Option<PathBuf>,
}

impl ServerArgs {
    /// Configured targets, falling back to the built-in list
    pub fn targets(&self) -> Vec<String> {
        let targets: Vec<String> = self
            .targets
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if targets.is_empty() {
            DEFAULT_TARGETS.iter().map(|t| t.to_string()).collect()
        } else {
            targets
        }
    }

    /// Scraper configuration derived from the flags
    pub fn scraper_config(&self) -> ScraperConfig {
        let mut config = ScraperConfig {
            mode: self.mode,
            request_delay_millis: self.delay_ms,
            ..ScraperConfig::default()
        };
        config.render.chrome_path = self.chrome_path.clone();
        config
    }

    /// Socket address string to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let args = ServerArgs::try_parse_from(["showscrape"]).unwrap();
        assert_eq!(args.port, 5000);
        assert_eq!(args.mode, ExtractionMode::Render);
        assert_eq!(args.targets(), DEFAULT_TARGETS.to_vec());
        assert_eq!(args.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_targets_comma_separated_and_repeated() {
        let args = ServerArgs::try_parse_from([
            "showscrape",
            "--target",
            "https://a.com/shows/a/1,https://b.com/shows/b/2",
            "-t",
            "https://c.com/shows/c/3",
        ])
        .unwrap();
        assert_eq!(
            args.targets(),
            vec![
                "https://a.com/shows/a/1",
                "https://b.com/shows/b/2",
                "https://c.com/shows/c/3"
            ]
        );
    }

    #[test]
    fn test_scraper_config_from_flags() {
        let args = ServerArgs::try_parse_from([
            "showscrape",
            "--mode",
            "static",
            "--delay-ms",
            "250",
            "--chrome-path",
            "/usr/bin/chromium",
        ])
        .unwrap();
        let config = args.scraper_config();
        assert_eq!(config.mode, ExtractionMode::Static);
        assert_eq!(config.request_delay_millis, 250);
        assert_eq!(config.render.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(ServerArgs::try_parse_from(["showscrape", "--mode", "selenium"]).is_err());
    }

    proptest! {
        #[test]
        fn prop_targets_never_empty(raw in "[a-z:/.,]{0,40}") {
            let args = ServerArgs::try_parse_from(["showscrape", "--target", raw.as_str()]).unwrap();
            prop_assert!(!args.targets().is_empty());
        }
    }
}
