//! Open-Meteo forecast API client
//!
//! This module fetches raw forecast bodies from the Open-Meteo API. Decoding
//! happens in `WeatherSnapshot::from_slice` so the same bytes can be handed
//! to the cache.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use super::api_error_reason;
use crate::cache::generate_key;
use crate::units::UnitSystem;

/// Base URL for the Open-Meteo API
const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Upper bound on a single forecast request
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Daily variables requested for the 7-day forecast
const DAILY_VARIABLES: &str = "weathercode,temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Hourly variables requested for the 24-hour forecast
const HOURLY_VARIABLES: &str = "temperature_2m,precipitation,weathercode";

const HOURLY_FORECAST_HOURS: &str = "24";

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("API request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with an error status
    #[error("API returned {status}: {reason}")]
    Api { status: u16, reason: String },
}

/// The shape of a forecast request: where, which blocks, which units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub daily: bool,
    pub hourly: bool,
    pub units: UnitSystem,
}

impl ForecastRequest {
    /// Cache key identifying this request shape
    pub fn cache_key(&self) -> String {
        generate_key(
            self.latitude,
            self.longitude,
            self.daily,
            self.hourly,
            self.units,
        )
    }

    /// Query parameters for the forecast endpoint
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("timezone", "auto".to_string()),
        ];

        query.extend(
            self.units
                .api_params()
                .iter()
                .map(|(name, value)| (*name, value.to_string())),
        );

        if self.daily {
            query.push(("daily", DAILY_VARIABLES.to_string()));
        }

        if self.hourly {
            query.push(("hourly", HOURLY_VARIABLES.to_string()));
            query.push(("forecast_hours", HOURLY_FORECAST_HOURS.to_string()));
        }

        query
    }
}

/// Client for fetching weather data from Open-Meteo API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    /// Create a new WeatherClient with default settings
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build forecast HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: OPEN_METEO_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different forecast endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the raw forecast body for a request
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - The response body, undecoded
    /// * `Err(WeatherError)` - If the request fails or the API reports an error
    pub async fn fetch_raw(&self, request: &ForecastRequest) -> Result<Vec<u8>, WeatherError> {
        tracing::debug!(
            latitude = request.latitude,
            longitude = request.longitude,
            daily = request.daily,
            hourly = request.hourly,
            units = %request.units,
            "Fetching forecast"
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&request.query())
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(WeatherError::Api {
                status: status.as_u16(),
                reason: api_error_reason(&body),
            });
        }

        Ok(body.to_vec())
    }
}
