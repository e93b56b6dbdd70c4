use std::io::Write;
use std::path::PathBuf;

use almanac_app::render::{load_events, render};
use almanac_core::config::load_config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    // stdout carries the rendered JSON, logs go to stderr
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let events_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| config.calendar.events_path.clone(), PathBuf::from);

    tracing::info!(path = %events_path.display(), "Loading events");

    let events = load_events(&events_path)?;
    let today = chrono::Local::now().date_naive();
    let rendered = render(&events, &config.calendar, today);

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &rendered)?;
    writeln!(stdout)?;

    Ok(())
}
