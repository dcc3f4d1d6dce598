//! Values produced while resolving one movie name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A folder name split into title, optional sequel number and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedName {
    /// Tokens before the series marker / year, in original order
    pub title_tokens: Vec<String>,

    /// Bare numeral immediately before the year (e.g. "2")
    pub series: Option<String>,

    /// First 4-digit all-digit token in the name
    pub year: String,
}

impl ParsedName {
    /// Title tokens joined with single spaces.
    pub fn title(&self) -> String {
        self.title_tokens.join(" ")
    }
}

/// Unescaped search text, e.g. `"Daddys Home 2 2017"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery(pub String);

impl SearchQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One candidate taken from a search results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidateRow {
    /// ASCII-folded, blacklist-stripped, lower-cased cell text
    pub normalized_text: String,

    /// Link of the row the cell belongs to
    pub href: String,
}

/// IMDb title identifier (`tt` followed by digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImdbId(String);

impl ImdbId {
    /// Accept `value` only if it has the `tt<digits>` shape.
    pub fn parse(value: &str) -> Option<Self> {
        let digits = value.strip_prefix("tt")?;
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
