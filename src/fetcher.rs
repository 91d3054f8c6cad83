//! HTTP fetcher for downloading provider IP lists.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::SyncError;

const TIMEOUT_SECS: u64 = 30;

/// HTTP client for fetching provider endpoints
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a new fetcher with default settings
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(format!("cdnsync/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Fetch a URL and return the response body as text.
    ///
    /// A non-success status or transport error maps to [`SyncError::Fetch`].
    /// No retries: a failed fetch fails the run.
    pub async fn fetch(&self, url: &str) -> Result<String, SyncError> {
        debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SyncError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        response.text().await.map_err(|e| SyncError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

// Default is intentionally not implemented for Fetcher because new() can
// fail and we want explicit error handling.
