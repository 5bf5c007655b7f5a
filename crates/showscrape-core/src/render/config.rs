use std::path::PathBuf;
use std::time::Duration;

use crate::client::DEFAULT_USER_AGENT;

/// CSS selectors locating the latest episode in the rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSelectors {
    /// One episode card; the first in document order is the latest episode
    pub card: String,
    /// Title heading inside a card
    pub title: String,
    /// Synopsis paragraph inside a card
    pub description: String,
    /// Container of the badge labels inside a card
    pub date_container: String,
    /// Individual labels inside the date container
    pub date_label: String,
    /// Which label holds the air date.
    ///
    /// The current layout puts a non-date badge (language) first, so the
    /// date is the second label. Unverified against every layout version.
    pub date_label_index: usize,
}

impl Default for CardSelectors {
    fn default() -> Self {
        Self {
            card: r#"[data-testid="episode-card"]"#.to_string(),
            title: "h3".to_string(),
            description: "p[class*='ON_IMAGE_ALT2']".to_string(),
            date_container: "div.LABEL_CAPTION2_MEDIUM".to_string(),
            date_label: "span.ON_IMAGE.LABEL_CAPTION1_SEMIBOLD".to_string(),
            date_label_index: 1,
        }
    }
}

/// Configuration for rendering sessions
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Run browser in headless mode
    pub headless: bool,

    /// Browser window size
    pub window_size: (u32, u32),

    /// User agent for the rendered page
    pub user_agent: String,

    /// Page-load timeout in seconds
    pub navigation_timeout_secs: u64,

    /// How long to wait for the first episode card, in seconds
    pub element_wait_secs: u64,

    /// Pause after the lazy-load scroll, in milliseconds
    pub settle_millis: u64,

    /// Chrome binary; auto-detected when unset
    pub chrome_path: Option<PathBuf>,

    /// Parent of the per-session profile directories; system temp dir when unset
    pub profile_root: Option<PathBuf>,

    /// Episode card selectors
    pub selectors: CardSelectors,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            navigation_timeout_secs: 30,
            element_wait_secs: 15,
            settle_millis: 3000,
            chrome_path: None,
            profile_root: None,
            selectors: CardSelectors::default(),
        }
    }
}

impl RenderConfig {
    /// Navigation timeout as Duration
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    /// Element wait as Duration
    pub fn element_wait(&self) -> Duration {
        Duration::from_secs(self.element_wait_secs)
    }

    /// Settle pause as Duration
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_millis)
    }

    /// Idle limit for the browser connection.
    ///
    /// Chrome is torn down if the devtools connection stays silent longer
    /// than this, so it must exceed the longest single wait of a session.
    pub fn idle_timeout(&self) -> Duration {
        self.navigation_timeout() + self.element_wait() + self.settle() + Duration::from_secs(30)
    }
}
