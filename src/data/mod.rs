//! Core weather data models
//!
//! This module contains the decoded forecast payload (`WeatherSnapshot`) shared
//! by the cache, the API clients, and the renderers.

pub mod geocode;
pub mod weather;

pub use geocode::{GeoLocation, GeocodeError, GeocodingClient};
pub use weather::{ForecastRequest, WeatherClient, WeatherError};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors raised while decoding a forecast payload
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The payload is not valid JSON for a snapshot
    #[error("Failed to parse weather data: {0}")]
    Decode(#[from] serde_json::Error),

    /// Parallel series in a block have different lengths
    #[error("{block} series have inconsistent lengths")]
    Misaligned { block: &'static str },
}

/// One fetched weather payload: current conditions plus optional forecasts
///
/// Field names follow the Open-Meteo response so a raw API body decodes
/// directly, and the cache stores the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Conditions at the time of the request
    pub current_weather: CurrentConditions,
    /// Daily forecast, present when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<DailySeries>,
    /// Hourly forecast, present when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly: Option<HourlySeries>,
}

/// Current weather conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    #[serde(rename = "windspeed", alias = "wind_speed")]
    pub wind_speed: f64,
    /// WMO weather code
    #[serde(rename = "weathercode", alias = "weather_code")]
    pub weather_code: u8,
    /// Local time of the observation (`YYYY-MM-DDTHH:MM`)
    pub time: String,
}

/// Daily forecast as index-aligned parallel series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    /// Dates (`YYYY-MM-DD`)
    #[serde(deserialize_with = "nulls_as_default")]
    pub time: Vec<String>,
    #[serde(
        rename = "weathercode",
        alias = "weather_code",
        deserialize_with = "nulls_as_default"
    )]
    pub weather_code: Vec<u8>,
    #[serde(rename = "temperature_2m_max", deserialize_with = "nulls_as_default")]
    pub temperature_max: Vec<f64>,
    #[serde(rename = "temperature_2m_min", deserialize_with = "nulls_as_default")]
    pub temperature_min: Vec<f64>,
    #[serde(deserialize_with = "nulls_as_default")]
    pub precipitation_sum: Vec<f64>,
}

/// Hourly forecast as index-aligned parallel series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    /// Local times (`YYYY-MM-DDTHH:MM`)
    #[serde(deserialize_with = "nulls_as_default")]
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m", deserialize_with = "nulls_as_default")]
    pub temperature: Vec<f64>,
    #[serde(deserialize_with = "nulls_as_default")]
    pub precipitation: Vec<f64>,
    #[serde(
        rename = "weathercode",
        alias = "weather_code",
        deserialize_with = "nulls_as_default"
    )]
    pub weather_code: Vec<u8>,
}

/// Decodes a series whose elements may be `null`, mapping each `null` to the
/// element's default so the series keeps its length
fn nulls_as_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let values: Vec<Option<T>> = Vec::deserialize(deserializer)?;
    Ok(values.into_iter().map(Option::unwrap_or_default).collect())
}

/// A single day from a `DailySeries`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyEntry<'a> {
    pub date: &'a str,
    pub weather_code: u8,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub precipitation_sum: f64,
}

/// A single hour from an `HourlySeries`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyEntry<'a> {
    pub time: &'a str,
    pub temperature: f64,
    pub precipitation: f64,
    pub weather_code: u8,
}

impl WeatherSnapshot {
    /// Decodes and validates a raw forecast body
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: WeatherSnapshot = serde_json::from_slice(bytes)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks that every forecast block has equal-length series
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if let Some(daily) = &self.daily {
            if !daily.is_aligned() {
                return Err(SnapshotError::Misaligned { block: "daily" });
            }
        }
        if let Some(hourly) = &self.hourly {
            if !hourly.is_aligned() {
                return Err(SnapshotError::Misaligned { block: "hourly" });
            }
        }
        Ok(())
    }

    /// Local date of the current observation (`YYYY-MM-DD`)
    pub fn observation_date(&self) -> &str {
        let time = self.current_weather.time.as_str();
        time.split_once('T').map_or(time, |(date, _)| date)
    }

    /// (max, min) temperature for `date`, if the daily series covers it
    pub fn high_low_for(&self, date: &str) -> Option<(f64, f64)> {
        self.daily
            .as_ref()?
            .entries()
            .find(|day| day.date == date)
            .map(|day| (day.temperature_max, day.temperature_min))
    }

    /// (max, min) temperature for the observation date
    pub fn todays_high_low(&self) -> Option<(f64, f64)> {
        self.high_low_for(self.observation_date())
    }
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    fn is_aligned(&self) -> bool {
        let len = self.time.len();
        self.weather_code.len() == len
            && self.temperature_max.len() == len
            && self.temperature_min.len() == len
            && self.precipitation_sum.len() == len
    }

    /// Iterates the series day by day
    pub fn entries(&self) -> impl Iterator<Item = DailyEntry<'_>> {
        self.time
            .iter()
            .zip(&self.weather_code)
            .zip(&self.temperature_max)
            .zip(&self.temperature_min)
            .zip(&self.precipitation_sum)
            .map(|((((date, code), max), min), precip)| DailyEntry {
                date,
                weather_code: *code,
                temperature_max: *max,
                temperature_min: *min,
                precipitation_sum: *precip,
            })
    }
}

impl HourlySeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    fn is_aligned(&self) -> bool {
        let len = self.time.len();
        self.temperature.len() == len
            && self.precipitation.len() == len
            && self.weather_code.len() == len
    }

    /// Iterates the series hour by hour
    pub fn entries(&self) -> impl Iterator<Item = HourlyEntry<'_>> {
        self.time
            .iter()
            .zip(&self.temperature)
            .zip(&self.precipitation)
            .zip(&self.weather_code)
            .map(|(((time, temp), precip), code)| HourlyEntry {
                time,
                temperature: *temp,
                precipitation: *precip,
                weather_code: *code,
            })
    }
}

/// Error body returned by the Open-Meteo APIs on bad requests
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    reason: String,
}

/// Extracts the `reason` from an error body, or returns the body as text
pub(crate) fn api_error_reason(body: &[u8]) -> String {
    serde_json::from_slice::<ApiErrorBody>(body)
        .map(|err| err.reason)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned())
}

/// Maps a WMO weather code to a human-readable description
pub fn describe_weather_code(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Open-Meteo forecast response with current, daily and hourly blocks
    pub const FULL_RESPONSE: &str = r#"{
        "latitude": 40.71,
        "longitude": -74.01,
        "generationtime_ms": 0.2,
        "utc_offset_seconds": 0,
        "timezone": "GMT",
        "elevation": 10.0,
        "current_weather": {
            "time": "2024-07-15T14:00",
            "interval": 900,
            "temperature": 22.5,
            "windspeed": 12.3,
            "winddirection": 270,
            "is_day": 1,
            "weathercode": 2
        },
        "daily_units": {
            "time": "iso8601",
            "weathercode": "wmo code",
            "temperature_2m_max": "°C",
            "temperature_2m_min": "°C",
            "precipitation_sum": "mm"
        },
        "daily": {
            "time": ["2024-07-15", "2024-07-16", "2024-07-17"],
            "weathercode": [2, 61, 95],
            "temperature_2m_max": [26.1, 21.0, 36.2],
            "temperature_2m_min": [17.4, 14.2, 24.8],
            "precipitation_sum": [0.0, 4.2, 12.5]
        },
        "hourly": {
            "time": ["2024-07-15T14:00", "2024-07-15T15:00", "2024-07-15T16:00"],
            "temperature_2m": [22.5, 23.1, -12.0],
            "precipitation": [0.0, 0.1, 0.4],
            "weathercode": [2, 3, 71]
        }
    }"#;

    /// Open-Meteo forecast response with only current conditions
    pub const CURRENT_ONLY_RESPONSE: &str = r#"{
        "latitude": 40.71,
        "longitude": -74.01,
        "current_weather": {
            "time": "2024-01-10T08:00",
            "temperature": -3.5,
            "windspeed": 20.0,
            "weathercode": 73
        }
    }"#;
}
