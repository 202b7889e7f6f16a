//! Temperature classification for colorized output

use crossterm::style::{Color, Stylize};

use crate::units::UnitSystem;

/// Severity tier for a temperature, used to pick a display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureTier {
    VeryCold,
    Cold,
    Cool,
    Pleasant,
    Warm,
    Hot,
    VeryHot,
}

impl TemperatureTier {
    /// Terminal color for this tier
    pub fn color(&self) -> Color {
        match self {
            TemperatureTier::VeryCold => Color::Blue,
            TemperatureTier::Cold => Color::Cyan,
            TemperatureTier::Cool => Color::White,
            TemperatureTier::Pleasant => Color::Green,
            TemperatureTier::Warm => Color::Yellow,
            TemperatureTier::Hot => Color::Magenta,
            TemperatureTier::VeryHot => Color::Red,
        }
    }

    /// Wraps `text` in this tier's color
    pub fn paint(&self, text: &str) -> String {
        text.with(self.color()).to_string()
    }
}

/// Buckets a Celsius temperature into a severity tier
///
/// Each bound is exclusive: -10.0 is `Cold`, 35.0 is `VeryHot`.
/// NaN compares false against every bound and lands in `VeryHot`.
pub fn classify(celsius: f64) -> TemperatureTier {
    if celsius < -10.0 {
        TemperatureTier::VeryCold
    } else if celsius < 0.0 {
        TemperatureTier::Cold
    } else if celsius < 15.0 {
        TemperatureTier::Cool
    } else if celsius < 25.0 {
        TemperatureTier::Pleasant
    } else if celsius < 30.0 {
        TemperatureTier::Warm
    } else if celsius < 35.0 {
        TemperatureTier::Hot
    } else {
        TemperatureTier::VeryHot
    }
}

/// Classifies a temperature given in `unit_system`'s display unit
pub fn classify_in(value: f64, unit_system: UnitSystem) -> TemperatureTier {
    classify(unit_system.to_celsius(value))
}

/// Formats a temperature with its unit (e.g. `21.5°C`)
pub fn format_temperature(value: f64, unit_system: UnitSystem) -> String {
    format!("{:.1}{}", value, unit_system.temperature_unit())
}

/// Formats a temperature with its unit, colored by its tier
pub fn colorize(value: f64, unit_system: UnitSystem) -> String {
    classify_in(value, unit_system).paint(&format_temperature(value, unit_system))
}
