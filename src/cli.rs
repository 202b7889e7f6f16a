//! Command-line interface parsing for Weather Console
//!
//! This module handles parsing of CLI arguments using clap and merging them
//! with stored preferences. Flags that can be left out (`--units`, `--color`,
//! `--table`...) are kept as overrides so that `--save` only persists what the
//! user actually passed.

use std::path::Path;

use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};

use crate::config::{Config, DisplayMode};
use crate::units::UnitSystem;

/// Weather Console - command line weather information
#[derive(Parser, Debug)]
#[command(name = "weather")]
#[command(about = "Current, daily and hourly weather for any location")]
#[command(version)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Show this help message
    #[arg(short = '?', long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,

    /// Show 7-day forecast
    #[arg(short, long)]
    pub daily: bool,

    /// Show hourly forecast for the next 24 hours
    #[arg(short = 'h', long)]
    pub hourly: bool,

    /// Override default location (ZIP/postal code or city name)
    #[arg(short, long, value_name = "LOCATION")]
    pub zip: Option<String>,

    /// Display output in table format
    #[arg(short, long, conflicts_with = "text")]
    pub table: bool,

    /// Display output in text format
    #[arg(short = 'T', long)]
    pub text: bool,

    /// Use specific units (metric or imperial)
    #[arg(short, long, value_name = "SYSTEM")]
    pub units: Option<String>,

    /// Enable colored output
    #[arg(short, long, overrides_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long, overrides_with = "color")]
    pub no_color: bool,

    /// Save current settings as defaults
    #[arg(short, long)]
    pub save: bool,
}

const EXAMPLES: &str = "\
Examples:
  Show 7-day forecast for a different location in imperial units:
    weather --daily --zip 10001 --units imperial

  Show hourly forecast in table format with colors and save settings:
    weather --hourly --table --color --save

  Save imperial as default unit system:
    weather --units imperial --save";

impl Cli {
    /// Builds the clap command with the runtime file locations in the help text
    pub fn command_with_paths(config_path: &Path, cache_dir: &Path) -> clap::Command {
        Self::command().after_help(format!(
            "{}\n\nConfiguration:\n  Your preferences are stored in: {}\n  \
             Weather data is cached for one hour in: {}",
            EXAMPLES,
            config_path.display(),
            cache_dir.display()
        ))
    }

    /// Parses process arguments, exiting on error or `--help`
    pub fn parse_with_paths(config_path: &Path, cache_dir: &Path) -> Self {
        let matches = Self::command_with_paths(config_path, cache_dir).get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    /// Location given on the command line, if any
    pub fn location_override(&self) -> Option<&str> {
        self.zip
            .as_deref()
            .map(str::trim)
            .filter(|loc| !loc.is_empty())
    }

    /// Display mode requested on the command line, if any
    pub fn display_mode_override(&self) -> Option<DisplayMode> {
        if self.table {
            Some(DisplayMode::Table)
        } else if self.text {
            Some(DisplayMode::Text)
        } else {
            None
        }
    }

    /// Unit system requested on the command line, if any
    ///
    /// Unrecognized values fall back to metric, like everywhere else.
    pub fn units_override(&self) -> Option<UnitSystem> {
        let raw = self.units.as_deref()?;
        if UnitSystem::parse(raw).is_none() {
            tracing::warn!("Unknown unit system '{}', using metric", raw);
        }
        Some(UnitSystem::parse_or_default(raw))
    }

    /// Three-state color choice: `Some(true)` for `--color`, `Some(false)`
    /// for `--no-color`, `None` when neither was given
    pub fn color_override(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }

    /// Applies the explicitly given flags to `config` for `--save`
    ///
    /// `location` is the location actually used for this run; it is stored
    /// unless blank or flag-like.
    pub fn updated_config(&self, config: &Config, location: &str) -> Config {
        let mut updated = config.clone();

        let location = location.trim();
        if !location.is_empty() && !location.starts_with('-') {
            updated.location = Some(location.to_string());
        }
        if let Some(mode) = self.display_mode_override() {
            updated.display_mode = mode;
        }
        if let Some(units) = self.units_override() {
            updated.units = units;
        }
        if let Some(use_colors) = self.color_override() {
            updated.use_colors = use_colors;
        }

        updated
    }
}

/// Effective settings for one run: command line over stored preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `None` means the user must be asked
    pub location: Option<String>,
    pub display_mode: DisplayMode,
    pub units: UnitSystem,
    pub use_colors: bool,
    pub show_daily: bool,
    pub show_hourly: bool,
}

impl Settings {
    /// Merges CLI flags over the stored config
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            location: cli
                .location_override()
                .or_else(|| config.location())
                .map(str::to_string),
            display_mode: cli.display_mode_override().unwrap_or(config.display_mode),
            units: cli.units_override().unwrap_or(config.units),
            use_colors: cli.color_override().unwrap_or(config.use_colors),
            show_daily: cli.daily,
            show_hourly: cli.hourly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_config() -> Config {
        Config {
            location: Some("Berlin".to_string()),
            display_mode: DisplayMode::Table,
            units: UnitSystem::Imperial,
            use_colors: false,
        }
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["weather"]);
        assert!(!cli.daily);
        assert!(!cli.hourly);
        assert!(cli.zip.is_none());
        assert!(cli.display_mode_override().is_none());
        assert!(cli.units_override().is_none());
        assert!(cli.color_override().is_none());
        assert!(!cli.save);
    }

    #[test]
    fn test_cli_parse_short_flags() {
        let cli = Cli::parse_from([
            "weather", "-d", "-h", "-z", "10001", "-t", "-u", "imperial", "-c", "-s",
        ]);
        assert!(cli.daily);
        assert!(cli.hourly);
        assert_eq!(cli.location_override(), Some("10001"));
        assert_eq!(cli.display_mode_override(), Some(DisplayMode::Table));
        assert_eq!(cli.units_override(), Some(UnitSystem::Imperial));
        assert_eq!(cli.color_override(), Some(true));
        assert!(cli.save);
    }

    #[test]
    fn test_cli_parse_text_short_flag() {
        let cli = Cli::parse_from(["weather", "-T"]);
        assert_eq!(cli.display_mode_override(), Some(DisplayMode::Text));
    }

    #[test]
    fn test_table_and_text_conflict() {
        let result = Cli::try_parse_from(["weather", "--table", "--text"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_last_color_flag_wins() {
        let cli = Cli::parse_from(["weather", "--color", "--no-color"]);
        assert_eq!(cli.color_override(), Some(false));

        let cli = Cli::parse_from(["weather", "--no-color", "--color"]);
        assert_eq!(cli.color_override(), Some(true));
    }

    #[test]
    fn test_unknown_units_fall_back_to_metric() {
        let cli = Cli::parse_from(["weather", "--units", "kelvin"]);
        assert_eq!(cli.units_override(), Some(UnitSystem::Metric));
    }

    #[test]
    fn test_blank_zip_is_no_override() {
        let cli = Cli::parse_from(["weather", "--zip", " "]);
        assert!(cli.location_override().is_none());
    }

    #[test]
    fn test_settings_default_from_config() {
        let cli = Cli::parse_from(["weather"]);
        let settings = Settings::resolve(&cli, &stored_config());

        assert_eq!(settings.location.as_deref(), Some("Berlin"));
        assert_eq!(settings.display_mode, DisplayMode::Table);
        assert_eq!(settings.units, UnitSystem::Imperial);
        assert!(!settings.use_colors);
        assert!(!settings.show_daily);
        assert!(!settings.show_hourly);
    }

    #[test]
    fn test_settings_cli_overrides_config() {
        let cli = Cli::parse_from([
            "weather", "--zip", "Tokyo", "--text", "--units", "metric", "--color", "--daily",
        ]);
        let settings = Settings::resolve(&cli, &stored_config());

        assert_eq!(settings.location.as_deref(), Some("Tokyo"));
        assert_eq!(settings.display_mode, DisplayMode::Text);
        assert_eq!(settings.units, UnitSystem::Metric);
        assert!(settings.use_colors);
        assert!(settings.show_daily);
    }

    #[test]
    fn test_settings_without_any_location() {
        let cli = Cli::parse_from(["weather"]);
        let settings = Settings::resolve(&cli, &Config::default());
        assert!(settings.location.is_none());
        assert_eq!(settings.display_mode, DisplayMode::Text);
        assert_eq!(settings.units, UnitSystem::Metric);
        assert!(settings.use_colors);
    }

    #[test]
    fn test_no_color_overrides_config() {
        let cli = Cli::parse_from(["weather", "--no-color"]);
        let settings = Settings::resolve(&cli, &Config::default());
        assert!(!settings.use_colors);
    }

    #[test]
    fn test_updated_config_only_saves_explicit_flags() {
        let cli = Cli::parse_from(["weather", "--units", "metric", "--save"]);
        let updated = cli.updated_config(&stored_config(), "Berlin");

        assert_eq!(updated.units, UnitSystem::Metric);
        // Not passed, so the stored values stay
        assert_eq!(updated.display_mode, DisplayMode::Table);
        assert!(!updated.use_colors);
        assert_eq!(updated.location.as_deref(), Some("Berlin"));
    }

    #[test]
    fn test_updated_config_saves_everything_given() {
        let cli = Cli::parse_from(["weather", "--text", "--color", "--units", "imperial"]);
        let updated = cli.updated_config(&Config::default(), "Lima");

        assert_eq!(updated.location.as_deref(), Some("Lima"));
        assert_eq!(updated.display_mode, DisplayMode::Text);
        assert_eq!(updated.units, UnitSystem::Imperial);
        assert!(updated.use_colors);
    }

    #[test]
    fn test_updated_config_skips_flag_like_location() {
        let cli = Cli::parse_from(["weather"]);
        let updated = cli.updated_config(&stored_config(), "-daily");
        assert_eq!(updated.location.as_deref(), Some("Berlin"));

        let updated = cli.updated_config(&stored_config(), "");
        assert_eq!(updated.location.as_deref(), Some("Berlin"));
    }

    #[test]
    fn test_help_mentions_paths() {
        let mut cmd = Cli::command_with_paths(
            Path::new("/home/me/.config/weather_config.json"),
            Path::new("/tmp/weather-cache"),
        );
        let help = cmd.render_long_help().to_string();
        assert!(help.contains("/home/me/.config/weather_config.json"));
        assert!(help.contains("/tmp/weather-cache"));
        assert!(help.contains("--hourly"));
    }
}
