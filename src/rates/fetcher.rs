//! HTTP rate fetcher
//!
//! Performs a single GET against a public exchange-rate endpoint and decodes
//! the JSON body into a code -> rate mapping. No retry, no backoff, no
//! response caching: a failed attempt is dropped and the next periodic tick
//! tries again.

use crate::error::{FxcalcError, Result};
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "https://api.exchangerate-api.com/v4/latest";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fetches base-relative exchange rates over HTTP
pub struct RateFetcher {
    base: String,
    endpoint: String,
    client: Client,
}

/// Wire format: only the `rates` object is read, every other field in the
/// body is ignored
#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

impl RateFetcher {
    /// Create a fetcher for the given base currency against the default
    /// public endpoint
    pub fn new(base: &str) -> Result<Self> {
        Self::with_endpoint(base, DEFAULT_ENDPOINT)
    }

    /// Create a fetcher against a custom endpoint
    ///
    /// The request URL is `{endpoint}/{base}`. Tests point this at a local
    /// stub server.
    pub fn with_endpoint(base: &str, endpoint: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                FxcalcError::FetchError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            base: base.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base currency this fetcher requests rates for
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Fetch the current rate mapping once
    pub async fn fetch_once(&self) -> Result<HashMap<String, f64>> {
        let url = format!("{}/{}", self.endpoint, self.base);
        debug!("Fetching exchange rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FxcalcError::FetchError(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FxcalcError::FetchError(format!(
                "Rate endpoint returned error: {}",
                response.status()
            )));
        }

        let body: RatesResponse = response
            .json()
            .await
            .map_err(|e| FxcalcError::PayloadError(format!("JSON parse error: {}", e)))?;

        debug!("Fetched {} rates for base {}", body.rates.len(), self.base);
        Ok(body.rates)
    }
}
