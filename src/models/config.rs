//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::PageSelectors;

/// Environment variable that overrides `metadata.api_key`.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Title-search service settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Search result matching rules
    #[serde(default)]
    pub matcher: MatcherConfig,

    /// CSS selectors for search and title pages
    #[serde(default)]
    pub selectors: PageSelectors,

    /// Canonical metadata service settings
    #[serde(default)]
    pub metadata: MetadataConfig,

    /// Filesystem locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// An unreadable file is `AppError::Config`; bad TOML is `AppError::Toml`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if url::Url::parse(&self.search.base_url).is_err() {
            return Err(AppError::validation(format!(
                "search.base_url is not a valid URL: {}",
                self.search.base_url
            )));
        }
        if url::Url::parse(&self.metadata.api_base).is_err() {
            return Err(AppError::validation(format!(
                "metadata.api_base is not a valid URL: {}",
                self.metadata.api_base
            )));
        }
        if self.matcher.allowed_qualifiers.iter().any(|q| q.trim().is_empty()) {
            return Err(AppError::validation(
                "matcher.allowed_qualifiers contains an empty entry",
            ));
        }
        self.selectors.validate()
    }

    /// API key for the metadata service, preferring the environment.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.metadata.api_key.clone())
            .filter(|k| !k.trim().is_empty())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Title-search service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Site root; result links are resolved against it
    #[serde(default = "defaults::search_base_url")]
    pub base_url: String,

    /// Query parameters restricting results to feature films
    #[serde(default = "defaults::strict_filter")]
    pub strict_filter: String,

    /// Query parameters used for the retry after an empty result page
    #[serde(default = "defaults::relaxed_filter")]
    pub relaxed_filter: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::search_base_url(),
            strict_filter: defaults::strict_filter(),
            relaxed_filter: defaults::relaxed_filter(),
        }
    }
}

/// Search result matching rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Substrings removed from row text before tokenizing (case-sensitive)
    #[serde(default = "defaults::blacklist_substrings")]
    pub blacklist_substrings: Vec<String>,

    /// Tokens tolerated in a row's residual (compared lower-cased)
    #[serde(default = "defaults::allowed_qualifiers")]
    pub allowed_qualifiers: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            blacklist_substrings: defaults::blacklist_substrings(),
            allowed_qualifiers: defaults::allowed_qualifiers(),
        }
    }
}

/// Canonical metadata service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// REST API root
    #[serde(default = "defaults::api_base")]
    pub api_base: String,

    /// Poster image root
    #[serde(default = "defaults::image_base")]
    pub image_base: String,

    /// API key; overridden by the `TMDB_API_KEY` environment variable
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            api_base: defaults::api_base(),
            image_base: defaults::image_base(),
            api_key: None,
        }
    }
}

/// Filesystem locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory whose subdirectories are movie folders
    #[serde(default = "defaults::movie_root")]
    pub movie_root: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            movie_root: defaults::movie_root(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Print per-movie progress lines
    #[serde(default = "defaults::show_progress")]
    pub show_progress: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            show_progress: defaults::show_progress(),
        }
    }
}

mod defaults {
    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; movie-rating/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Search defaults
    pub fn search_base_url() -> String {
        "http://www.imdb.com".into()
    }
    pub fn strict_filter() -> String {
        "s=tt&ttype=ft&ref_=fn_ft".into()
    }
    pub fn relaxed_filter() -> String {
        "s=tt".into()
    }

    // Matcher defaults
    pub fn blacklist_substrings() -> Vec<String> {
        vec!["(TV Movie)".into(), ":".into(), "(Short)".into()]
    }
    pub fn allowed_qualifiers() -> Vec<String> {
        vec!["(I)".into(), "(II)".into()]
    }

    // Metadata defaults
    pub fn api_base() -> String {
        "https://api.themoviedb.org/3".into()
    }
    pub fn image_base() -> String {
        "https://image.tmdb.org/t/p/w500".into()
    }

    pub fn movie_root() -> String {
        "movies".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
    pub fn show_progress() -> bool {
        true
    }
}
