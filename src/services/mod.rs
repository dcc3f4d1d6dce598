//! Service layer for the movie lookup application.
//!
//! This module contains the business logic for:
//! - Folder name parsing (`parser`)
//! - Search query construction (`query`)
//! - Search result disambiguation (`SearchResultMatcher`)
//! - Match verification against canonical metadata (`verifier`)
//!
//! and the adapters around them:
//! - Title search (`TitleSearch`)
//! - Title page scraping (`RatingScraper`)
//! - Canonical metadata lookup (`TmdbClient`)
//! - Poster download (`PosterDownloader`)

pub mod matcher;
pub mod metadata;
pub mod parser;
pub mod poster;
pub mod query;
pub mod rating;
pub mod search;
pub mod verifier;

pub use matcher::SearchResultMatcher;
pub use metadata::{MetadataProvider, TmdbClient};
pub use poster::PosterDownloader;
pub use rating::RatingScraper;
pub use search::TitleSearch;
