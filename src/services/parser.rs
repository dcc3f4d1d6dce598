// src/services/parser.rs

//! Folder name parsing.
//!
//! Release folders look like `Title.Words.[Series.]Year.Junk...`:
//!
//! ```text
//! Wilson.2017.LIMITED.720p.BluRay.x264-GECKOS
//! Labor.Day.2013.BluRay.1080p.DTS.x264-CHD.chs
//! Daddys.Home.2.2017.1080p.WEB-DL.DD5.1.H264-FGT
//! ```
//!
//! The first 4-digit token is the year and everything after it is dropped.
//! No attempt is made to tell a real year from a 4-digit tag; first one wins.

use crate::error::ParseFailure;
use crate::models::ParsedName;

/// Token delimiter in release folder names.
pub const DELIMITER: char = '.';

/// Parse a raw folder name.
pub fn parse(raw: &str) -> Result<ParsedName, ParseFailure> {
    let tokens: Vec<&str> = raw.split(DELIMITER).collect();

    let year_idx = tokens
        .iter()
        .position(|t| is_year(t))
        .ok_or_else(|| ParseFailure::NoYear {
            raw: raw.to_string(),
        })?;

    let year = tokens[year_idx].to_string();
    let before = &tokens[..year_idx];

    let (title, series) = match before.split_last() {
        Some((last, rest)) if is_numeral(last) => (rest, Some(last.to_string())),
        _ => (before, None),
    };

    let title_tokens: Vec<String> = title
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect();

    // A query made only of parenthesized tokens would carry no title at all.
    if !title_tokens.iter().any(|t| !t.contains(['(', ')'])) {
        return Err(ParseFailure::EmptyTitle {
            raw: raw.to_string(),
        });
    }

    log::debug!(
        "Parsed '{}' -> title={:?} series={:?} year={}",
        raw,
        title_tokens,
        series,
        year
    );

    Ok(ParsedName {
        title_tokens,
        series,
        year,
    })
}

/// Exactly four ASCII digits.
fn is_year(token: &str) -> bool {
    token.len() == 4 && is_numeral(token)
}

/// Non-empty and all ASCII digits.
fn is_numeral(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}
