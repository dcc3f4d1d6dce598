// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

use crate::error::Result;
use crate::models::{ImdbId, SearchQuery};

/// Resolve a potentially relative href against a base URL.
///
/// # Examples
/// ```
/// use movie_rating::utils::url::resolve;
///
/// assert_eq!(
///     resolve("http://www.imdb.com", "/title/tt1375666/").unwrap(),
///     "http://www.imdb.com/title/tt1375666/"
/// );
/// ```
pub fn resolve(base: &str, href: &str) -> Result<String> {
    Ok(Url::parse(base)?.join(href)?.to_string())
}

/// Build the title-search URL for a query and a filter such as `s=tt`.
///
/// The query is percent-encoded here; filter parameters are appended as-is.
pub fn search_url(base: &str, query: &SearchQuery, filter: &str) -> Result<String> {
    let mut url = Url::parse(base)?.join("/find")?;
    url.query_pairs_mut()
        .append_pair("ref_", "nv_sr_fn")
        .append_pair("q", query.as_str());

    let mut url = url.to_string();
    let filter = filter.trim_start_matches(['?', '&']);
    if !filter.is_empty() {
        url.push('&');
        url.push_str(filter);
    }
    Ok(url)
}

/// Extract the IMDb identifier from a title link.
///
/// Takes the last non-empty path segment (`/title/tt6255746/?ref_=fn_ft_tt_1`
/// gives `tt6255746`) and accepts it only if it has the `tt<digits>` shape.
pub fn extract_imdb_id(base: &str, href: &str) -> Option<ImdbId> {
    let url = Url::parse(base).ok()?.join(href).ok()?;
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    ImdbId::parse(segment)
}
