//! Forward geocoding: convert a postal code or place name to coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::api_error_reason;

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur when resolving a location
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("geocoding request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("failed to parse geocoding response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The API answered with an error status
    #[error("geocoding API returned {status}: {reason}")]
    Api { status: u16, reason: String },

    /// No location was given
    #[error("no location given")]
    EmptyQuery,

    /// The API found no match
    #[error("location not found: {0}")]
    NotFound(String),
}

/// A resolved geographical point
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

impl GeoLocation {
    /// Place name with country for disambiguation (e.g. "Paris, France")
    pub fn label(&self) -> String {
        match self.country.as_deref().filter(|c| !c.is_empty()) {
            Some(country) => format!("{}, {}", self.name, country),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeoLocation>,
}

/// Client for the Open-Meteo geocoding API
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

impl Default for GeocodingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodingClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build geocoding HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: GEOCODING_URL.to_string(),
        }
    }

    /// Point the client at a different search endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve a location to its best-matching coordinates
    pub async fn search(&self, location: &str) -> Result<GeoLocation, GeocodeError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("name", location), ("count", "1")])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                reason: api_error_reason(&body),
            });
        }

        let parsed: GeocodingResponse = serde_json::from_slice(&body)?;

        let result = parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(location.to_string()))?;

        tracing::debug!(
            latitude = result.latitude,
            longitude = result.longitude,
            "Geocoded {} to {}",
            location,
            result.label()
        );
        Ok(result)
    }
}
