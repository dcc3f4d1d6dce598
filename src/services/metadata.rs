// src/services/metadata.rs

//! Canonical metadata service (TMDB) client.

use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::error::{AppError, Result};
use crate::models::{CanonicalRecord, ImdbId, MetadataConfig, MovieDetails};

/// Looks up canonical movie records by IMDb identifier.
pub trait MetadataProvider {
    fn movie_details(&self, id: &ImdbId) -> Result<MovieDetails>;

    fn canonical_record(&self, id: &ImdbId) -> Result<CanonicalRecord> {
        Ok(self.movie_details(id)?.into())
    }
}

/// TMDB REST client using the `/movie/{imdb_id}` lookup.
pub struct TmdbClient<'a> {
    client: &'a Client,
    api_base: String,
    api_key: String,
}

impl<'a> TmdbClient<'a> {
    pub fn new(client: &'a Client, config: &MetadataConfig, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn details_url(&self, id: &ImdbId) -> Result<String> {
        let mut url = url::Url::parse(&format!("{}/movie/{}", self.api_base, id))?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("format", "json");
        Ok(url.to_string())
    }
}

impl MetadataProvider for TmdbClient<'_> {
    fn movie_details(&self, id: &ImdbId) -> Result<MovieDetails> {
        let url = self.details_url(id)?;
        log::info!("Send GET request: {}/movie/{}", self.api_base, id);

        let response = self.client.get(&url).send()?;
        let status = response.status();
        let body = response.text()?;

        if status != StatusCode::OK {
            return Err(AppError::metadata(
                id.as_str(),
                format!("expected response code 200, but got {}: {}", status.as_u16(), body),
            ));
        }

        let details: MovieDetails = serde_json::from_str(&body)?;
        log::debug!(
            "Details for {}: title={:?} original_title={:?} release_date={:?} vote_average={:?} \
             original_language={:?} revenue={:?} poster_path={:?} countries={:?}",
            id,
            details.title,
            details.original_title,
            details.release_date,
            details.vote_average,
            details.original_language,
            details.revenue,
            details.poster_path,
            details.country_names()
        );
        Ok(details)
    }
}
