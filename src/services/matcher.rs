// src/services/matcher.rs

//! Search result disambiguation.
//!
//! A row is accepted when the set of its tokens, minus the tokens we expect
//! (title words, series number, `"(year)"`), is empty or made only of allowed
//! qualifiers such as `"(ii)"`. Rows are tried in document order and the first
//! accepted one wins.
//!
//! Because the comparison is set-based, a row may omit expected tokens (the
//! series number is often not rendered), and word order and duplicates are
//! ignored. Extra unexpected words reject the row.

use std::collections::HashSet;

use crate::models::{MatcherConfig, ParsedName, SearchCandidateRow};
use crate::utils::ascii_fold;

/// Picks the search result row that corresponds to a parsed name.
#[derive(Debug, Clone)]
pub struct SearchResultMatcher {
    blacklist: Vec<String>,
    allowed: HashSet<String>,
}

impl SearchResultMatcher {
    pub fn new(config: &MatcherConfig) -> Self {
        Self {
            blacklist: config.blacklist_substrings.clone(),
            allowed: config
                .allowed_qualifiers
                .iter()
                .map(|q| q.to_lowercase())
                .collect(),
        }
    }

    /// Normalize raw cell text with this matcher's blacklist.
    pub fn normalize(&self, text: &str) -> String {
        normalize(text, &self.blacklist)
    }

    /// Return the href of the first acceptable row, if any.
    pub fn find_match(&self, rows: &[SearchCandidateRow], parsed: &ParsedName) -> Option<String> {
        let expected = expected_tokens(parsed);

        rows.iter()
            .find(|row| {
                let residual = residual(&tokenize(&row.normalized_text), &expected);
                let accepted = self.is_acceptable(&residual);
                log::debug!(
                    "Row '{}' residual={:?} accepted={}",
                    row.normalized_text,
                    residual,
                    accepted
                );
                accepted
            })
            .map(|row| row.href.clone())
    }

    /// Empty residual, or only allowed qualifiers left over.
    pub fn is_acceptable(&self, residual: &HashSet<String>) -> bool {
        residual.iter().all(|t| self.allowed.contains(t))
    }
}

impl Default for SearchResultMatcher {
    fn default() -> Self {
        Self::new(&MatcherConfig::default())
    }
}

/// Fold to ASCII, strip blacklisted substrings and apostrophes, lower-case.
///
/// Blacklist removal is case-sensitive and happens before lower-casing.
pub fn normalize(text: &str, blacklist: &[String]) -> String {
    let mut result = ascii_fold(text).trim().to_string();

    for s in blacklist {
        result = result.replace(s.as_str(), "");
    }

    result.replace('\'', "").trim().to_lowercase()
}

/// Whitespace-separated tokens as a set.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Lower-cased title tokens, the series marker and the parenthesized year.
pub fn expected_tokens(parsed: &ParsedName) -> HashSet<String> {
    let mut expected: HashSet<String> = parsed
        .title_tokens
        .iter()
        .flat_map(|t| t.split_whitespace())
        .map(str::to_lowercase)
        .collect();

    if let Some(series) = &parsed.series {
        expected.insert(series.clone());
    }
    expected.insert(format!("({})", parsed.year));
    expected
}

/// Row tokens not present in the expected set.
pub fn residual(row: &HashSet<String>, expected: &HashSet<String>) -> HashSet<String> {
    row.difference(expected).cloned().collect()
}
