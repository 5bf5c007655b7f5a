//! Rendering fallback
//!
//! Loads a page in headless Chrome so its client-side scripts run, then
//! reads the first episode card from the resulting DOM.
//!
//! - `config`: timeouts, window, selectors
//! - `card`: first-card extraction from a DOM snapshot
//! - `session`: browser and profile lifecycle

pub mod card;
pub mod config;
pub mod session;

pub use card::{extract_first_card, RenderedEpisode, SOURCE_RENDERED};
pub use config::{CardSelectors, RenderConfig};
pub use session::{render_episode, RenderingSession, SessionState};
