//! First-card extraction over a rendered DOM snapshot
//!
//! Runs on the HTML captured after scripts have executed, so it can be
//! tested without a browser. Every query takes the first match in
//! document order.

use scraper::{ElementRef, Html, Selector};

use super::config::CardSelectors;
use crate::error::{Result, ScrapeError};
use crate::extractor::non_blank;
use crate::types::{EpisodeSummary, ExtractionStatus};

/// Source label for rendered results
pub const SOURCE_RENDERED: &str = "rendered-dom";

/// Fields read from the first episode card
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedEpisode {
    /// Card heading
    pub title: Option<String>,
    /// Card synopsis
    pub description: Option<String>,
    /// Air-date label text
    pub air_date: Option<String>,
}

impl RenderedEpisode {
    /// `Success` with all three fields, `LimitedData` without a date label,
    /// `PartialSuccess` otherwise.
    pub fn status(&self) -> ExtractionStatus {
        match (&self.title, &self.description, &self.air_date) {
            (Some(_), Some(_), Some(_)) => ExtractionStatus::Success,
            (_, _, None) => ExtractionStatus::LimitedData,
            _ => ExtractionStatus::PartialSuccess,
        }
    }

    /// Convert into a result for the given show
    pub fn into_summary(self, show_name: &str) -> EpisodeSummary {
        let status = self.status();
        EpisodeSummary::from_fields(
            show_name,
            self.title,
            self.description,
            self.air_date,
            status,
            SOURCE_RENDERED,
        )
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| ScrapeError::Parse(format!("Invalid selector {:?}: {:?}", selector, e)))
}

/// Extract the latest episode from a rendered page.
///
/// # Errors
/// - `ScrapeError::ContentNotFound` - the page has no episode card
/// - `ScrapeError::Parse` - a configured selector is invalid
pub fn extract_first_card(html: &str, selectors: &CardSelectors) -> Result<RenderedEpisode> {
    let card_selector = compile(&selectors.card)?;
    let title_selector = compile(&selectors.title)?;
    let description_selector = compile(&selectors.description)?;
    let container_selector = compile(&selectors.date_container)?;
    let label_selector = compile(&selectors.date_label)?;

    let document = Html::parse_document(html);
    let card = document
        .select(&card_selector)
        .next()
        .ok_or_else(|| ScrapeError::ContentNotFound("no episode card in rendered page".to_string()))?;

    Ok(RenderedEpisode {
        title: first_text(&card, &title_selector),
        description: first_text(&card, &description_selector),
        air_date: card
            .select(&container_selector)
            .next()
            .and_then(|container| {
                container
                    .select(&label_selector)
                    .nth(selectors.date_label_index)
            })
            .and_then(|label| element_text(&label)),
    })
}

fn first_text(scope: &ElementRef, selector: &Selector) -> Option<String> {
    scope.select(selector).next().and_then(|el| element_text(&el))
}

/// Full text content of an element, trimmed.
fn element_text(element: &ElementRef) -> Option<String> {
    non_blank(Some(element.text().collect::<String>()))
}
