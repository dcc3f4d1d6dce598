//! Pipeline entry points for movie lookups.
//!
//! - `list_movies`: Enumerate movie folders under a root directory
//! - `MovieLookup` / `run_batch`: Resolve names to IMDb identities and ratings

pub mod lookup;
pub mod scan;

pub use lookup::{BatchSummary, LookupOptions, LookupOutcome, MovieLookup, run_batch};
pub use scan::list_movies;
