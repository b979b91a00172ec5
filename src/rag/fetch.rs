//! HTTP fetching of handbook pages.

use crate::types::{AppError, Result};
use crate::utils::config::SourcesConfig;
use std::time::Duration;
use tracing::{debug, info};

/// Fetches handbook pages over HTTP with a shared client.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Build a fetcher from source settings.
    pub fn new(config: &SourcesConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Fetch(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch a page and return its HTML body.
    ///
    /// Non-2xx responses are errors. Callers ingesting a batch treat a
    /// per-URL failure as a warning and continue with the remaining URLs.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "Fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch(format!("{} returned HTTP {}", url, status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to read body from {}: {}", url, e)))?;

        info!(url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
