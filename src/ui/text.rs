//! Line-oriented text output

use super::{format_clock, format_day, RenderOptions, HOURLY_LIMIT};
use crate::data::{describe_weather_code, WeatherSnapshot};

/// Renders a snapshot as indented text lines
pub fn render(snapshot: &WeatherSnapshot, options: &RenderOptions) -> String {
    let units = options.units;
    let precip_unit = units.precipitation_unit();
    let current = &snapshot.current_weather;

    let mut output = String::from("Current Weather:\n");
    output.push_str(&format!(
        "  Temperature: {}\n",
        options.temperature(current.temperature)
    ));

    if let Some((high, low)) = snapshot.todays_high_low() {
        output.push_str(&format!(
            "  High/Low: {}/{}\n",
            options.temperature(high),
            options.temperature(low)
        ));
    }

    output.push_str(&format!(
        "  Wind Speed: {:.1} {}\n",
        current.wind_speed,
        units.wind_speed_unit()
    ));
    output.push_str(&format!("  Time: {}\n", format_clock(&current.time)));
    output.push_str(&format!(
        "  Weather: {}\n",
        describe_weather_code(current.weather_code)
    ));

    if let Some(daily) = snapshot
        .daily
        .as_ref()
        .filter(|d| options.show_daily && !d.is_empty())
    {
        output.push_str("\n7-Day Forecast:\n");
        for day in daily.entries() {
            output.push_str(&format!(
                "  {}: {}, {} to {}, Precipitation: {:.1}{}\n",
                format_day(day.date),
                describe_weather_code(day.weather_code),
                options.temperature(day.temperature_min),
                options.temperature(day.temperature_max),
                day.precipitation_sum,
                precip_unit
            ));
        }
    }

    if let Some(hourly) = snapshot
        .hourly
        .as_ref()
        .filter(|h| options.show_hourly && !h.is_empty())
    {
        output.push_str("\nHourly Forecast (next 24h):\n");
        for hour in hourly.entries().take(HOURLY_LIMIT) {
            output.push_str(&format!(
                "  {}: {}, {}, Precipitation: {:.1}{}\n",
                format_clock(hour.time),
                describe_weather_code(hour.weather_code),
                options.temperature(hour.temperature),
                hour.precipitation,
                precip_unit
            ));
        }
    }

    output
}
