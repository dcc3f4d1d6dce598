// src/services/search.rs

//! Title-search service client.
//!
//! Fetches the search results page for a query and turns its result table
//! into [`SearchCandidateRow`]s. When the feature-film search comes back
//! empty, the query is retried once without the result-type filter.

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{PageSelectors, SearchCandidateRow, SearchConfig, SearchQuery, parse_selector};
use crate::services::SearchResultMatcher;
use crate::utils::http::PageFetcher;
use crate::utils::url::search_url;

/// Service for querying the title-search pages.
pub struct TitleSearch<'a> {
    fetcher: &'a dyn PageFetcher,
    config: &'a SearchConfig,
    matcher: &'a SearchResultMatcher,
    no_results: Selector,
    row: Selector,
    cell: Selector,
    link: Selector,
    attr_name: String,
}

impl<'a> TitleSearch<'a> {
    /// Create a new search client; fails if a configured selector is invalid.
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        config: &'a SearchConfig,
        selectors: &PageSelectors,
        matcher: &'a SearchResultMatcher,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            config,
            matcher,
            no_results: parse_selector(&selectors.no_results_selector)?,
            row: parse_selector(&selectors.result_row_selector)?,
            cell: parse_selector(&selectors.result_cell_selector)?,
            link: parse_selector(&selectors.result_link_selector)?,
            attr_name: selectors.attr_name.clone(),
        })
    }

    /// Fetch the results page, retrying once with the relaxed filter.
    pub fn search(&self, query: &SearchQuery) -> Result<Html> {
        let url = search_url(&self.config.base_url, query, &self.config.strict_filter)?;
        log::info!("Searching for movie: {}", url);
        let document = self.fetcher.fetch_page(&url)?;

        if !self.is_empty_page(&document) {
            return Ok(document);
        }

        let url = search_url(&self.config.base_url, query, &self.config.relaxed_filter)?;
        log::info!("No results with strict filter, retrying: {}", url);
        self.fetcher.fetch_page(&url)
    }

    /// Search and extract candidate rows in document order.
    pub fn candidates(&self, query: &SearchQuery) -> Result<Vec<SearchCandidateRow>> {
        let document = self.search(query)?;
        Ok(self.extract_rows(&document))
    }

    /// Whether the page carries the "no results" marker.
    pub fn is_empty_page(&self, document: &Html) -> bool {
        document.select(&self.no_results).next().is_some()
    }

    /// One candidate per non-empty cell, each carrying its row's link.
    pub fn extract_rows(&self, document: &Html) -> Vec<SearchCandidateRow> {
        let mut rows = Vec::new();

        for row in document.select(&self.row) {
            let Some(href) = self.row_link(&row) else {
                continue;
            };

            for cell in row.select(&self.cell) {
                let raw: String = cell.text().collect();
                let normalized_text = self.matcher.normalize(&raw);
                if normalized_text.is_empty() {
                    continue;
                }
                rows.push(SearchCandidateRow {
                    normalized_text,
                    href: href.clone(),
                });
            }
        }

        log::debug!("Extracted {} candidate rows", rows.len());
        rows
    }

    fn row_link(&self, row: &ElementRef) -> Option<String> {
        row.select(&self.link)
            .filter_map(|a| a.value().attr(&self.attr_name))
            .map(str::trim)
            .find(|href| !href.is_empty())
            .map(str::to_string)
    }
}
