// src/services/rating.rs

//! Title page scraping: displayed title and rating value.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::Result;
use crate::models::{PageSelectors, RatingPage, parse_selector};
use crate::utils::ascii_fold;
use crate::utils::http::PageFetcher;
use crate::utils::url::resolve;

static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?").expect("valid rating regex"));

/// Reads the rating and heading from a matched title page.
pub struct RatingScraper<'a> {
    fetcher: &'a dyn PageFetcher,
    base_url: &'a str,
    rating: Selector,
    title: Selector,
}

impl<'a> RatingScraper<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        base_url: &'a str,
        selectors: &PageSelectors,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            base_url,
            rating: parse_selector(&selectors.rating_selector)?,
            title: parse_selector(&selectors.title_selector)?,
        })
    }

    /// Absolute URL of a matched result link.
    pub fn page_url(&self, href: &str) -> Result<String> {
        resolve(self.base_url, href)
    }

    /// Fetch and scrape the title page behind `href`.
    pub fn fetch(&self, href: &str) -> Result<RatingPage> {
        let url = self.page_url(href)?;
        log::info!("Get movie rating from: {}", url);
        let document = self.fetcher.fetch_page(&url)?;
        let page = self.scrape(&document);
        log::info!("Movie Rating: {:?}", page.rating);
        Ok(page)
    }

    pub fn scrape(&self, document: &Html) -> RatingPage {
        let displayed_title = document
            .select(&self.title)
            .next()
            .map(|el| {
                let text: String = el.text().collect();
                ascii_fold(&normalize_whitespace(&text))
            })
            .unwrap_or_default();

        let rating = document.select(&self.rating).next().and_then(|el| {
            let text: String = el.text().collect();
            parse_rating(&text)
        });

        RatingPage {
            displayed_title,
            rating,
        }
    }
}

/// First number in the text, accepting `,` as decimal separator.
pub fn parse_rating(text: &str) -> Option<f32> {
    RATING_RE
        .find(text)
        .and_then(|m| m.as_str().replace(',', ".").parse().ok())
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
