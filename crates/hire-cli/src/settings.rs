//! Runtime settings: an optional TOML file plus `BOATYARD_*` environment variables.
//!
//! ```toml
//! data_file = "boatyard.json"
//! slot_minutes = 15
//! max_duration_minutes = 180
//! log_level = "info"
//! ```

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use hire_engine::{MAX_DURATION_MINUTES, SLOT_MINUTES};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub data_file: PathBuf,
    pub slot_minutes: i64,
    pub max_duration_minutes: i64,
    pub log_level: LogLevel,
}

impl Settings {
    /// Load settings from `path` (required when given) or `./boatyard.toml` (optional),
    /// then apply environment overrides such as `BOATYARD_DATA_FILE`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("data_file", "boatyard.json")?
            .set_default("slot_minutes", SLOT_MINUTES)?
            .set_default("max_duration_minutes", MAX_DURATION_MINUTES)?
            .set_default("log_level", "warn")?;

        let builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("boatyard").required(false)),
        };

        builder
            .add_source(Environment::with_prefix("BOATYARD"))
            .build()?
            .try_deserialize::<Settings>()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The configured level raised by one step per `-v`.
    pub fn raised_by(self, steps: u8) -> Self {
        const ORDER: [LogLevel; 5] = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let current = ORDER.iter().position(|l| *l == self).unwrap_or(1);
        ORDER[(current + steps as usize).min(ORDER.len() - 1)]
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
