// src/services/query.rs

//! Search query construction.

use crate::models::{ParsedName, SearchQuery};

/// Build the search text for a parsed name.
///
/// Parenthesized title tokens are dropped; the series marker (if any) and the
/// year are appended in that order. The result is not URL-encoded.
pub fn build_query(parsed: &ParsedName) -> SearchQuery {
    let title = parsed.title();
    let mut parts: Vec<&str> = title
        .split_whitespace()
        .filter(|t| !t.contains(['(', ')']))
        .collect();

    if let Some(series) = &parsed.series {
        parts.push(series);
    }
    parts.push(&parsed.year);

    let query = SearchQuery(parts.join(" "));
    log::debug!("Created query: {}", query);
    query
}
