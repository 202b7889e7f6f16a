//! Weather Console - current, daily and hourly weather in the terminal
//!
//! Looks up a location with the Open-Meteo geocoding API, fetches its
//! forecast (served from a one-hour file cache when possible) and prints it
//! as text or tables.

use std::io;
use std::process;

use tracing_subscriber::EnvFilter;

use weather_console::app::App;
use weather_console::cli::Cli;

/// Logs go to stderr so they never mix with the report on stdout
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let app = App::new();
    let cli = Cli::parse_with_paths(app.config_store().path(), app.cache().cache_dir());

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();

    if let Err(e) = app.run(&cli, &mut input, &mut out).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
