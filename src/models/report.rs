//! Per-movie results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::ImdbId;

/// Result of cross-checking a match against the metadata service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub passed: bool,

    /// One entry per failed check
    pub failures: Vec<String>,

    /// Observations that do not affect `passed`
    pub notes: Vec<String>,
}

impl VerificationOutcome {
    pub fn from_failures(failures: Vec<String>) -> Self {
        Self {
            passed: failures.is_empty(),
            failures,
            notes: Vec::new(),
        }
    }

    /// Human-readable reason.
    pub fn reason(&self) -> String {
        if self.passed {
            "PASSED".to_string()
        } else {
            format!("Failed: {}", self.failures.join("; "))
        }
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

/// Final result for one movie that was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieReport {
    /// Raw folder name
    pub name: String,
    pub title: String,
    pub year: String,
    pub imdb_id: ImdbId,

    /// Absolute title page URL
    pub url: String,
    pub rating: Option<f32>,

    /// Present when verification was requested and metadata was available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification: Option<VerificationOutcome>,
}

impl fmt::Display for MovieReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rating {
            Some(rating) => write!(f, "{} ({}): {:.1} / 10.0", self.title, self.year, rating),
            None => write!(f, "{} ({}): N/A / 10.0", self.title, self.year),
        }
    }
}
