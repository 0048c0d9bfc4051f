//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local runs.

use chrono::{FixedOffset, Offset, Utc};
use std::env;
use std::path::PathBuf;

use crate::models::TimeWindow;
use crate::time_utils::offset_from_minutes;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one JSON file per stored collection
    pub data_dir: PathBuf,
    /// Window used when no other is selected
    pub report_window: TimeWindow,
    /// Offset used to decide which calendar day a session falls on
    pub utc_offset: FixedOffset,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            report_window: TimeWindow::Week,
            utc_offset: Utc.fix(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `WORKOUT_DATA_DIR` (default `data`)
    /// - `REPORT_WINDOW`: `day`, `week`, `month` or `year` (default `week`)
    /// - `REPORT_UTC_OFFSET_MINUTES` (default `0`)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("WORKOUT_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));

        let report_window = match lookup("REPORT_WINDOW") {
            Some(value) => value
                .parse()
                .map_err(|reason| ConfigError::Invalid("REPORT_WINDOW", reason))?,
            None => TimeWindow::default(),
        };

        let offset_minutes = match lookup("REPORT_UTC_OFFSET_MINUTES") {
            Some(value) => value.trim().parse::<i32>().map_err(|e| {
                ConfigError::Invalid("REPORT_UTC_OFFSET_MINUTES", e.to_string())
            })?,
            None => 0,
        };
        let utc_offset = offset_from_minutes(offset_minutes).ok_or_else(|| {
            ConfigError::Invalid(
                "REPORT_UTC_OFFSET_MINUTES",
                format!("{offset_minutes} is outside -1439..=1439"),
            )
        })?;

        Ok(Self {
            data_dir,
            report_window,
            utc_offset,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
