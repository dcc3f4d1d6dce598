// src/error.rs

//! Unified error handling for the movie lookup application.

use std::fmt;

use thiserror::Error;

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
///
/// Everything here is a real failure (bad config, network, malformed
/// responses). Expected per-movie outcomes such as "no year in the name"
/// or "no matching search row" are not errors; see [`ParseFailure`] and
/// `pipeline::LookupOutcome`.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Server answered with something other than a 200 HTML page
    #[error("Unexpected response from {url}: status {status}, content-type '{content_type}'")]
    UnexpectedResponse {
        url: String,
        status: u16,
        content_type: String,
    },

    /// Metadata service error
    #[error("Metadata error for {context}: {message}")]
    Metadata { context: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a metadata error with context.
    pub fn metadata(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Metadata {
            context: context.into(),
            message: message.to_string(),
        }
    }
}

/// Why a raw folder name could not be turned into a `ParsedName`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// No 4-digit all-digit token anywhere in the name
    #[error("Invalid movie name '{raw}': no year info was found")]
    NoYear { raw: String },

    /// A year was found but nothing usable precedes it
    #[error("Invalid movie name '{raw}': no title before the year")]
    EmptyTitle { raw: String },
}
