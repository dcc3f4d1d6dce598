//! Records read from the metadata service and the title page.

use serde::{Deserialize, Serialize};

/// Movie details as returned by the metadata service.
///
/// Only the fields this tool reads are declared; everything is optional
/// because the service omits or nulls fields freely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub revenue: Option<u64>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionCountry {
    pub name: String,
}

impl MovieDetails {
    pub fn country_names(&self) -> Vec<&str> {
        self.production_countries
            .iter()
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// The fields of a metadata record used for verification and posters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub title: String,

    /// Usually `YYYY-MM-DD`
    pub release_date: String,

    pub poster_path: Option<String>,
}

impl CanonicalRecord {
    /// Everything before the first `-` of the release date.
    pub fn release_year(&self) -> &str {
        self.release_date
            .split('-')
            .next()
            .unwrap_or_default()
            .trim()
    }
}

impl From<MovieDetails> for CanonicalRecord {
    fn from(details: MovieDetails) -> Self {
        Self {
            title: details.title.unwrap_or_default(),
            release_date: details.release_date.unwrap_or_default(),
            poster_path: details.poster_path.filter(|p| !p.trim().is_empty()),
        }
    }
}

/// What the title page shows for a matched result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingPage {
    /// ASCII-folded heading text, typically "Title (Year)"
    pub displayed_title: String,

    pub rating: Option<f32>,
}
