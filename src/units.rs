//! Measurement unit systems
//!
//! Maps the user's unit-system choice to display units and to the query
//! parameters the forecast API needs, and normalizes temperatures to Celsius
//! for classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Measurement units used for fetching and displaying weather data
///
/// Any unrecognized or empty identifier falls back to `Metric`. This rule is
/// applied everywhere a unit system is read from text (CLI flag, config file).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum UnitSystem {
    /// Celsius, km/h, millimetres
    #[default]
    Metric,
    /// Fahrenheit, mph, inches
    Imperial,
}

impl UnitSystem {
    /// Parses a unit-system identifier, falling back to `Metric`
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Parses a unit-system identifier, returning `None` when it is not recognized
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Some(UnitSystem::Metric),
            "imperial" => Some(UnitSystem::Imperial),
            _ => None,
        }
    }

    /// Stable identifier, used in cache keys and the config file
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    /// Human-readable name listing the units involved
    pub fn display_name(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "Metric (°C, km/h, mm)",
            UnitSystem::Imperial => "Imperial (°F, mph, in)",
        }
    }

    pub fn temperature_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    pub fn wind_speed_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "km/h",
            UnitSystem::Imperial => "mph",
        }
    }

    pub fn precipitation_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "mm",
            UnitSystem::Imperial => "in",
        }
    }

    /// Query parameters asking the forecast API for this unit system
    ///
    /// Metric is the API default, so it needs none.
    pub fn api_params(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            UnitSystem::Metric => &[],
            UnitSystem::Imperial => &[
                ("temperature_unit", "fahrenheit"),
                ("windspeed_unit", "mph"),
                ("precipitation_unit", "inch"),
            ],
        }
    }

    /// Converts a temperature in this unit system to Celsius
    pub fn to_celsius(&self, value: f64) -> f64 {
        normalize_to_reference(value, *self)
    }
}

impl From<String> for UnitSystem {
    fn from(s: String) -> Self {
        Self::parse_or_default(&s)
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts a temperature to the reference scale (Celsius)
///
/// Imperial values are treated as Fahrenheit; metric values are returned unchanged.
pub fn normalize_to_reference(value: f64, unit_system: UnitSystem) -> f64 {
    match unit_system {
        UnitSystem::Imperial => (value - 32.0) * 5.0 / 9.0,
        UnitSystem::Metric => value,
    }
}
