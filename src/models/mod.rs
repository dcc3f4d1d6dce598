// src/models/mod.rs

//! Domain models for the movie lookup application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod movie;
mod record;
mod report;
mod selectors;

// Re-export all public types
pub use config::{
    API_KEY_ENV, Config, HttpConfig, LoggingConfig, MatcherConfig, MetadataConfig, PathsConfig,
    SearchConfig,
};
pub use movie::{ImdbId, ParsedName, SearchCandidateRow, SearchQuery};
pub use record::{CanonicalRecord, MovieDetails, ProductionCountry, RatingPage};
pub use report::{MovieReport, VerificationOutcome};
pub use selectors::{PageSelectors, parse_selector};
