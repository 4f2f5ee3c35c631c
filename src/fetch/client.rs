//! HTTP client for importing captures published at a URL.

use crate::utils::config::DEFAULT_FETCH_TIMEOUT;
use crate::utils::error::FetchError;
use log::{debug, info};
use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

/// Blocking client that downloads a JSON capture
pub struct FetchClient {
    client: Client,
}

impl FetchClient {
    /// Create a client with the default timeout
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    /// Create a client with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::RequestFailed)?;

        Ok(Self { client })
    }

    /// GET `url` and parse the body as JSON
    ///
    /// The body is returned as-is; shape checking is left to the normalizer.
    pub fn fetch_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let url = validate_url(url)?;

        info!("Fetching capture from: {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(FetchError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body: serde_json::Value = response.json().map_err(FetchError::RequestFailed)?;
        debug!("Fetched JSON body from {}", url);

        Ok(body)
    }
}

/// Parse `raw` and require an http(s) scheme
pub fn validate_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl(format!(
            "unsupported scheme '{}' in {}",
            other, raw
        ))),
    }
}
