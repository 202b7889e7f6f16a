//! Bordered table output
//!
//! Column widths are computed from the plain (uncolored) cell text, and color
//! is applied after padding so escape codes never skew the alignment.

use super::{format_clock, format_day, truncate, RenderOptions, HOURLY_LIMIT};
use crate::data::{describe_weather_code, WeatherSnapshot};

/// Longest condition description shown in a cell
const CONDITION_WIDTH: usize = 15;

/// A table cell: the text used for layout and the text actually printed
#[derive(Debug, Clone, PartialEq)]
struct Cell {
    plain: String,
    styled: String,
}

impl Cell {
    fn text(text: impl Into<String>) -> Self {
        let plain = text.into();
        Self {
            styled: plain.clone(),
            plain,
        }
    }

    fn condition(code: u8) -> Self {
        Self::text(truncate(describe_weather_code(code), CONDITION_WIDTH))
    }

    fn temperature(value: f64, options: &RenderOptions) -> Self {
        let mut plain_options = *options;
        plain_options.use_colors = false;
        Self {
            plain: plain_options.temperature(value),
            styled: options.temperature(value),
        }
    }

    /// Two temperatures joined by `/` (e.g. high/low)
    fn temperature_pair(first: f64, second: f64, options: &RenderOptions) -> Self {
        let first = Self::temperature(first, options);
        let second = Self::temperature(second, options);
        Self {
            plain: format!("{}/{}", first.plain, second.plain),
            styled: format!("{}/{}", first.styled, second.styled),
        }
    }

    fn width(&self) -> usize {
        self.plain.chars().count()
    }
}

/// Lays out a header and rows into a bordered table
fn layout(headers: &[&str], rows: &[Vec<Cell>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(Cell::width)
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = border_line(&widths);
    let header_cells: Vec<Cell> = headers.iter().map(|h| Cell::text(*h)).collect();

    let mut output = String::new();
    output.push_str(&border);
    output.push_str(&row_line(&widths, &header_cells));
    output.push_str(&border);
    for row in rows {
        output.push_str(&row_line(&widths, row));
    }
    output.push_str(&border);
    output
}

fn border_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn row_line(widths: &[usize], cells: &[Cell]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        line.push(' ');
        line.push_str(&cell.styled);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
        line.push_str(" |");
    }
    line.push('\n');
    line
}

/// Renders a snapshot as bordered tables
pub fn render(snapshot: &WeatherSnapshot, options: &RenderOptions) -> String {
    let units = options.units;
    let precip_unit = units.precipitation_unit();
    let current = &snapshot.current_weather;

    // Without a daily series the current temperature stands in for high/low
    let (high, low) = snapshot
        .todays_high_low()
        .unwrap_or((current.temperature, current.temperature));

    let mut output = String::from("Current Weather:\n");
    output.push_str(&layout(
        &["Temperature", "High/Low", "Wind", "Time", "Condition"],
        &[vec![
            Cell::temperature(current.temperature, options),
            Cell::temperature_pair(high, low, options),
            Cell::text(format!("{:.1} {}", current.wind_speed, units.wind_speed_unit())),
            Cell::text(format_clock(&current.time)),
            Cell::condition(current.weather_code),
        ]],
    ));

    if let Some(daily) = snapshot
        .daily
        .as_ref()
        .filter(|d| options.show_daily && !d.is_empty())
    {
        let rows: Vec<Vec<Cell>> = daily
            .entries()
            .map(|day| {
                vec![
                    Cell::text(format_day(day.date)),
                    Cell::condition(day.weather_code),
                    Cell::temperature(day.temperature_min, options),
                    Cell::temperature(day.temperature_max, options),
                    Cell::text(format!("{:.1}{}", day.precipitation_sum, precip_unit)),
                ]
            })
            .collect();

        output.push_str("\n7-Day Forecast:\n");
        output.push_str(&layout(
            &["Date", "Condition", "Min Temp", "Max Temp", "Precipitation"],
            &rows,
        ));
    }

    if let Some(hourly) = snapshot
        .hourly
        .as_ref()
        .filter(|h| options.show_hourly && !h.is_empty())
    {
        let rows: Vec<Vec<Cell>> = hourly
            .entries()
            .take(HOURLY_LIMIT)
            .map(|hour| {
                vec![
                    Cell::text(format_clock(hour.time)),
                    Cell::condition(hour.weather_code),
                    Cell::temperature(hour.temperature, options),
                    Cell::text(format!("{:.1}{}", hour.precipitation, precip_unit)),
                ]
            })
            .collect();

        output.push_str("\nHourly Forecast (next 24h):\n");
        output.push_str(&layout(
            &["Time", "Condition", "Temperature", "Precipitation"],
            &rows,
        ));
    }

    output
}
