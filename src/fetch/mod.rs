//! Remote capture import over HTTP.

pub mod client;

pub use client::{validate_url, FetchClient};

use crate::parser::{normalize, RequestRecord};
use anyhow::{Context, Result};
use std::time::Duration;

/// Fetch a capture from `url` and normalize it
pub fn import_url(url: &str, timeout: Duration) -> Result<Vec<RequestRecord>> {
    let client = FetchClient::with_timeout(timeout).context("Failed to create HTTP client")?;

    let payload = client
        .fetch_json(url)
        .with_context(|| format!("Failed to fetch capture from {}", url))?;

    let records = normalize(&payload).context("Fetched data is not a usable capture")?;

    Ok(records)
}
