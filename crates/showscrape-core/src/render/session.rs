//! Headless-browser session lifecycle
//!
//! A session owns one Chrome process and one freshly created profile
//! directory for exactly one target:
//!
//! `Idle -> Launched -> Navigated -> WaitingForContent -> Extracted -> Closed`
//!
//! Any step may move the session to `Failed`. Teardown lives in a single
//! place ([`RenderingSession::close`], also run by `Drop`): it terminates the
//! browser and removes the profile directory exactly once, whatever state
//! was reached.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use headless_chrome::{Browser, LaunchOptions};
use tempfile::TempDir;
use tracing::{debug, info, warn};

use super::card::{extract_first_card, RenderedEpisode};
use super::config::RenderConfig;
use crate::error::{Result, ScrapeError};
use crate::target::Target;
use crate::types::EpisodeSummary;

/// Chrome flags for stable headless runs
const CHROME_FLAGS: [&str; 4] = [
    "--disable-gpu",
    "--disable-dev-shm-usage",
    "--log-level=3",
    "--disable-blink-features=AutomationControlled",
];

/// Script that forces lazy-loaded content to attach
const SCROLL_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Prefix of per-session profile directories
const PROFILE_PREFIX: &str = "showscrape-profile-";

/// Lifecycle state of a rendering session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Profile allocated, no browser yet
    Idle,
    /// Chrome is running
    Launched,
    /// The page finished loading
    Navigated,
    /// Waiting for the first episode card
    WaitingForContent,
    /// Card fields were read
    Extracted,
    /// A step returned an error
    Failed,
    /// Browser terminated and profile removed
    Closed,
}

/// One isolated browser instance, used for one target
pub struct RenderingSession {
    browser: Option<Browser>,
    profile: Option<TempDir>,
    profile_path: PathBuf,
    config: RenderConfig,
    state: SessionState,
}

impl RenderingSession {
    /// Allocate a fresh profile directory under `profile_root`. No browser
    /// is started yet.
    ///
    /// # Errors
    /// Returns `ScrapeError::Io` if the directory cannot be created
    pub fn new(config: RenderConfig) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(PROFILE_PREFIX);
        let profile = match &config.profile_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        let profile_path = profile.path().to_path_buf();
        debug!(profile = %profile_path.display(), "allocated browser profile");

        Ok(Self {
            browser: None,
            profile: Some(profile),
            profile_path,
            config,
            state: SessionState::Idle,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Location of this session's profile directory
    pub fn profile_path(&self) -> &Path {
        &self.profile_path
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = ?self.state, to = ?next, "render session transition");
        self.state = next;
    }

    /// Run a step, moving to `Failed` if it errors.
    fn step<T>(&mut self, run: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let result = run(self);
        if result.is_err() {
            self.transition(SessionState::Failed);
        }
        result
    }

    /// Start Chrome against this session's profile directory.
    ///
    /// # Errors
    /// Returns `ScrapeError::Browser` if Chrome cannot be configured or started
    pub fn launch(&mut self) -> Result<()> {
        self.step(|session| {
            let user_agent_arg = format!("--user-agent={}", session.config.user_agent);
            let mut args: Vec<&OsStr> = CHROME_FLAGS.iter().map(OsStr::new).collect();
            args.push(OsStr::new(&user_agent_arg));

            let options = LaunchOptions::default_builder()
                .headless(session.config.headless)
                .sandbox(false)
                .window_size(Some(session.config.window_size))
                .user_data_dir(Some(session.profile_path.clone()))
                .path(session.config.chrome_path.clone())
                .idle_browser_timeout(session.config.idle_timeout())
                .args(args)
                .build()
                .map_err(|e| ScrapeError::Browser(e.to_string()))?;

            let browser = Browser::new(options).map_err(|e| ScrapeError::Browser(e.to_string()))?;
            session.browser = Some(browser);
            session.transition(SessionState::Launched);
            Ok(())
        })
    }

    /// Load `url`, wait for episode cards, nudge lazy loading and read the
    /// first card.
    ///
    /// # Errors
    /// - `ScrapeError::Navigation` / `NavigationTimeout` - page did not load
    /// - `ScrapeError::ContentNotFound` - no episode card appeared
    /// - `ScrapeError::Browser` - devtools protocol failure
    pub fn extract(&mut self, url: &str) -> Result<RenderedEpisode> {
        self.step(|session| session.run_extraction(url))
    }

    fn run_extraction(&mut self, url: &str) -> Result<RenderedEpisode> {
        let config = self.config.clone();
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| ScrapeError::Browser("session was not launched".to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::Browser(e.to_string()))?;
        tab.set_default_timeout(config.navigation_timeout());
        tab.set_user_agent(&config.user_agent, None, None)
            .map_err(|e| ScrapeError::Browser(e.to_string()))?;

        tab.navigate_to(url).map_err(|e| ScrapeError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        tab.wait_until_navigated()
            .map_err(|_| ScrapeError::NavigationTimeout(url.to_string()))?;
        self.transition(SessionState::Navigated);

        self.transition(SessionState::WaitingForContent);
        tab.wait_for_element_with_custom_timeout(&config.selectors.card, config.element_wait())
            .map_err(|_| ScrapeError::ContentNotFound(url.to_string()))?;

        tab.evaluate(SCROLL_SCRIPT, false)
            .map_err(|e| ScrapeError::Browser(format!("Scroll failed: {}", e)))?;
        std::thread::sleep(config.settle());

        let html = tab
            .get_content()
            .map_err(|e| ScrapeError::Browser(e.to_string()))?;
        let episode = extract_first_card(&html, &config.selectors).map_err(|e| match e {
            ScrapeError::ContentNotFound(_) => ScrapeError::ContentNotFound(url.to_string()),
            other => other,
        })?;

        self.transition(SessionState::Extracted);
        Ok(episode)
    }

    /// Terminate the browser and delete the profile directory.
    ///
    /// Idempotent. Failures are logged, never returned.
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }

        if let Some(browser) = self.browser.take() {
            drop(browser);
            debug!("browser process terminated");
        }

        if let Some(profile) = self.profile.take() {
            if let Err(e) = profile.close() {
                warn!(
                    profile = %self.profile_path.display(),
                    error = %e,
                    "failed to remove browser profile"
                );
            }
        }

        self.transition(SessionState::Closed);
    }
}

impl Drop for RenderingSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Render one target in its own session.
///
/// Blocking; run it on a blocking thread from async code. The session is
/// torn down before this returns on every path.
///
/// # Errors
/// Any launch, navigation or content error of the session
pub fn render_episode(target: &Target, config: &RenderConfig) -> Result<EpisodeSummary> {
    let mut session = RenderingSession::new(config.clone())?;
    session.launch()?;
    let episode = session.extract(&target.url)?;

    info!(show = %target.show_name, status = ?episode.status(), "rendered episode");
    Ok(episode.into_summary(&target.show_name))
}
