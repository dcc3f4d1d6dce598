// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Source of remote documents.
///
/// The pipeline only talks to the network through this trait so it can be
/// driven by canned pages in tests.
pub trait PageFetcher {
    /// Fetch an HTML page and return its body.
    fn fetch_html(&self, url: &str) -> Result<String>;

    /// Fetch a binary resource (poster images).
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;

    /// Fetch a page and parse it as HTML.
    fn fetch_page(&self, url: &str) -> Result<Html> {
        Ok(Html::parse_document(&self.fetch_html(url)?))
    }
}

/// Create a configured blocking HTTP client.
pub fn create_client(config: &HttpConfig) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?)
}

/// [`PageFetcher`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        Ok(Self::new(create_client(config)?))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch_html(&self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();
        let content_type = content_type(&response);

        if !is_good_response(status, &content_type) {
            return Err(AppError::UnexpectedResponse {
                url: url.to_string(),
                status: status.as_u16(),
                content_type,
            });
        }
        Ok(response.text()?)
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(AppError::UnexpectedResponse {
                url: url.to_string(),
                status: status.as_u16(),
                content_type: content_type(&response),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

fn content_type(response: &Response) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// A 200 response whose content type looks like HTML.
pub fn is_good_response(status: StatusCode, content_type: &str) -> bool {
    status == StatusCode::OK && content_type.to_lowercase().contains("html")
}
