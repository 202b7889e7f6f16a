//! Application flow for Weather Console
//!
//! This module ties the pieces together for one invocation: resolve settings,
//! optionally save them, geocode the location, serve the forecast from the
//! cache or the API, and render it.

use std::io::{BufRead, Write};

use thiserror::Error;

use crate::cache::{CacheError, CacheManager};
use crate::cli::{Cli, Settings};
use crate::config::{Config, ConfigError, ConfigStore};
use crate::data::{
    ForecastRequest, GeocodeError, GeocodingClient, SnapshotError, WeatherClient, WeatherError,
    WeatherSnapshot,
};
use crate::ui::{self, RenderOptions};

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not get coordinates: {0}")]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("error saving config: {0}")]
    Config(#[from] ConfigError),

    #[error("no location given")]
    MissingLocation,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Main application struct holding the stores and API clients
#[derive(Debug, Clone)]
pub struct App {
    config_store: ConfigStore,
    cache: CacheManager,
    geocoder: GeocodingClient,
    weather_client: WeatherClient,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new App using the default config path, cache dir and API endpoints
    pub fn new() -> Self {
        Self::with_parts(
            ConfigStore::new(),
            CacheManager::new(),
            GeocodingClient::new(),
            WeatherClient::new(),
        )
    }

    /// Creates a new App from custom parts (for testing)
    pub fn with_parts(
        config_store: ConfigStore,
        cache: CacheManager,
        geocoder: GeocodingClient,
        weather_client: WeatherClient,
    ) -> Self {
        Self {
            config_store,
            cache,
            geocoder,
            weather_client,
        }
    }

    pub fn config_store(&self) -> &ConfigStore {
        &self.config_store
    }

    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// Runs one lookup: `input` answers the location prompt, `out` receives the report
    pub async fn run<R: BufRead, W: Write>(
        &self,
        cli: &Cli,
        input: &mut R,
        out: &mut W,
    ) -> Result<(), AppError> {
        let config = self.config_store.load();
        let settings = Settings::resolve(cli, &config);

        let location = match settings.location.clone() {
            Some(location) => location,
            None => prompt_location(input, out)?,
        };

        if cli.save {
            self.save_settings(cli, &config, &location, out)?;
        }

        if location.is_empty() {
            return Err(AppError::MissingLocation);
        }

        let place = self.geocoder.search(&location).await?;
        writeln!(out, "Location detected: {}", place.label())?;

        let request = ForecastRequest {
            latitude: place.latitude,
            longitude: place.longitude,
            daily: settings.show_daily,
            hourly: settings.show_hourly,
            units: settings.units,
        };
        let snapshot = self.load_snapshot(&request, out).await?;

        let options = RenderOptions {
            mode: settings.display_mode,
            units: settings.units,
            use_colors: settings.use_colors,
            show_daily: settings.show_daily,
            show_hourly: settings.show_hourly,
        };
        write!(out, "{}", ui::render(&snapshot, &options))?;
        out.flush()?;
        Ok(())
    }

    /// Serves a forecast from the cache, fetching and caching it on a miss
    ///
    /// A failure to write the cache is logged and otherwise ignored.
    pub async fn load_snapshot<W: Write>(
        &self,
        request: &ForecastRequest,
        out: &mut W,
    ) -> Result<WeatherSnapshot, AppError> {
        let key = request.cache_key();

        if let Some(snapshot) = self.cache.lookup(&key) {
            tracing::debug!(key = %key, "Cache hit");
            writeln!(out, "Using cached weather data")?;
            return Ok(snapshot);
        }
        tracing::debug!(key = %key, "Cache miss");

        let body = self.weather_client.fetch_raw(request).await?;
        let snapshot = WeatherSnapshot::from_slice(&body)?;

        if let Err(e) = self.cache.store(&key, &body) {
            log_cache_failure(&e);
        }

        Ok(snapshot)
    }

    /// Persists the explicitly given settings and reports what was saved
    fn save_settings<W: Write>(
        &self,
        cli: &Cli,
        config: &Config,
        location: &str,
        out: &mut W,
    ) -> Result<(), AppError> {
        let updated = cli.updated_config(config, location);
        self.config_store.save(&updated)?;

        writeln!(out, "All settings saved:")?;
        writeln!(out, "- Location: {}", updated.location().unwrap_or(""))?;
        writeln!(out, "- Display mode: {}", updated.display_mode)?;
        writeln!(out, "- Unit system: {}", updated.units.display_name())?;
        writeln!(out, "- Colors: {}", updated.use_colors)?;
        Ok(())
    }
}

fn log_cache_failure(error: &CacheError) {
    tracing::warn!("Failed to cache weather data: {}", error);
}

/// Asks the user for a location on `out` and reads one line from `input`
fn prompt_location<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String, AppError> {
    write!(out, "Enter your location (ZIP/postal code or city name): ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
