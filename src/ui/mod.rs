//! Output rendering for Weather Console
//!
//! This module turns a `WeatherSnapshot` into printable text, either as
//! indented lines (`text`) or as bordered columns (`table`). Renderers return
//! a `String`; the caller decides where it goes.

pub mod table;
pub mod text;

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::DisplayMode;
use crate::data::WeatherSnapshot;
use crate::temperature::{colorize, format_temperature};
use crate::units::UnitSystem;

/// Maximum number of hourly rows shown
pub const HOURLY_LIMIT: usize = 24;

/// Everything a renderer needs besides the snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub mode: DisplayMode,
    pub units: UnitSystem,
    pub use_colors: bool,
    pub show_daily: bool,
    pub show_hourly: bool,
}

impl RenderOptions {
    /// Formats a temperature, colored by tier when colors are enabled
    pub(crate) fn temperature(&self, value: f64) -> String {
        if self.use_colors {
            colorize(value, self.units)
        } else {
            format_temperature(value, self.units)
        }
    }
}

/// Renders a snapshot in the requested display mode
pub fn render(snapshot: &WeatherSnapshot, options: &RenderOptions) -> String {
    match options.mode {
        DisplayMode::Text => text::render(snapshot, options),
        DisplayMode::Table => table::render(snapshot, options),
    }
}

/// Formats an ISO local time (`2024-07-15T14:00`) as `14:00`
///
/// Unparseable input is returned unchanged.
pub fn format_clock(time: &str) -> String {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|_| time.to_string())
}

/// Formats an ISO date (`2024-07-15`) as `Mon Jul 15`
///
/// Unparseable input is returned unchanged.
pub fn format_day(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a %b %-d").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Shortens `s` to at most `max_len` characters, ending in `...` when cut
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let mut shortened: String = s.chars().take(keep).collect();
    shortened.push_str("...");
    shortened
}
