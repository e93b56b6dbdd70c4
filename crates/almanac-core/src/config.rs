use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, FileFormat};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::types::{CalendarView, TimeFormat, WeekStart};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub calendar: CalendarConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    pub week_start: WeekStart,
    pub time_format: TimeFormat,
    pub view: CalendarView,
    /// Day the visible grid is built around; today when unset.
    pub anchor_date: Option<NaiveDate>,
    pub events_path: PathBuf,
}

impl CalendarConfig {
    /// ## Summary
    /// Returns the configured anchor date, falling back to `today`.
    #[must_use]
    pub fn anchor_or(&self, today: NaiveDate) -> NaiveDate {
        self.anchor_date.unwrap_or(today)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("calendar.week_start", WeekStart::default().as_str())?
            .set_default("calendar.time_format", TimeFormat::default().as_str())?
            .set_default("calendar.view", CalendarView::default().as_str())?
            .set_default("calendar.events_path", "events.json")?
            .set_default("logging.level", "info")?)
    }

    /// ## Summary
    /// Loads configuration from an optional `almanac.toml` and `ALMANAC_*` environment
    /// variables into a `Settings`. Environment variables take precedence over the file.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::defaults()?
            // TOML file
            .add_source(config::File::with_name("almanac.toml").required(false))
            // Env, e.g. ALMANAC_CALENDAR__WEEK_START=sunday
            .add_source(
                config::Environment::with_prefix("ALMANAC")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true),
            )
            .build()?
            .try_deserialize::<Self>()?
            .validated()?)
    }

    /// ## Summary
    /// Builds `Settings` from TOML text layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the text is not valid TOML or does not match the schema.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(Self::defaults()?
            .add_source(config::File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?
            .validated()?)
    }

    /// ## Errors
    /// Returns `CoreError::ConfigError` if the events path or log level is blank.
    fn validated(self) -> CoreResult<Self> {
        if self.calendar.events_path.as_os_str().is_empty() {
            return Err(CoreError::ConfigError(
                "calendar.events_path must not be empty".into(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "logging.level must not be empty".into(),
            ));
        }
        Ok(self)
    }
}

/// ## Summary
/// Loads configuration from environment variables, `.env` file and `almanac.toml`.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::trace!(error = %e, "No .env file loaded");
    }

    Settings::load()
}
