// src/models/selectors.rs

//! CSS selectors for scraping search result and title pages.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// CSS selectors for scraping the title-search and title-detail pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageSelectors {
    /// Marker element present when a search returned nothing
    #[serde(default = "defaults::no_results")]
    pub no_results_selector: String,

    /// Selector for each result row on the search page
    #[serde(default = "defaults::result_row")]
    pub result_row_selector: String,

    /// Selector for the cells within a result row
    #[serde(default = "defaults::result_cell")]
    pub result_cell_selector: String,

    /// Selector for the link element within a result row
    #[serde(default = "defaults::result_link")]
    pub result_link_selector: String,

    /// Selector for the rating value on the title page
    #[serde(default = "defaults::rating")]
    pub rating_selector: String,

    /// Selector for the displayed title heading on the title page
    #[serde(default = "defaults::title")]
    pub title_selector: String,

    /// HTML attribute name for extracting links (usually "href")
    #[serde(default = "defaults::attr_name")]
    pub attr_name: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            no_results_selector: defaults::no_results(),
            result_row_selector: defaults::result_row(),
            result_cell_selector: defaults::result_cell(),
            result_link_selector: defaults::result_link(),
            rating_selector: defaults::rating(),
            title_selector: defaults::title(),
            attr_name: defaults::attr_name(),
        }
    }
}

impl PageSelectors {
    /// Check that every selector parses.
    pub fn validate(&self) -> Result<()> {
        for s in [
            &self.no_results_selector,
            &self.result_row_selector,
            &self.result_cell_selector,
            &self.result_link_selector,
            &self.rating_selector,
            &self.title_selector,
        ] {
            parse_selector(s)?;
        }
        if self.attr_name.trim().is_empty() {
            return Err(AppError::validation("selectors.attr_name is empty"));
        }
        Ok(())
    }
}

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

mod defaults {
    pub fn no_results() -> String {
        "div.findNoResults".into()
    }
    pub fn result_row() -> String {
        "table.findList tr".into()
    }
    pub fn result_cell() -> String {
        "td".into()
    }
    pub fn result_link() -> String {
        "a[href]".into()
    }
    pub fn rating() -> String {
        "span[itemprop=\"ratingValue\"]".into()
    }
    pub fn title() -> String {
        "h1[itemprop=\"name\"]".into()
    }
    pub fn attr_name() -> String {
        "href".into()
    }
}
