//! Runtime settings resolved from CLI flags, environment and `.env`.

use std::time::Duration;

use riskline_core::{MoexConfig, RiskError};
use thiserror::Error;

use crate::cli::Cli;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{field} must be a finite, non-negative number of seconds, got {value}")]
    InvalidSeconds { field: &'static str, value: f64 },

    #[error(transparent)]
    Moex(#[from] RiskError),

    #[error("failed to load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
}

/// Validated settings shared by every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub moex: MoexConfig,
    pub log_level: String,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self, SettingsError> {
        let connection = &cli.connection;
        let timeout = seconds("http_timeout_seconds", connection.http_timeout_seconds)?;
        let backoff = seconds(
            "http_retry_backoff_seconds",
            connection.http_retry_backoff_seconds,
        )?;

        let moex = MoexConfig::new(
            connection.moex_base_url.as_str(),
            timeout,
            connection.http_retry_count,
            backoff,
        )?;

        Ok(Self {
            moex,
            log_level: cli.log_level.clone(),
        })
    }
}

pub fn seconds(field: &'static str, value: f64) -> Result<Duration, SettingsError> {
    if !value.is_finite() || value < 0.0 {
        return Err(SettingsError::InvalidSeconds { field, value });
    }
    Duration::try_from_secs_f64(value).map_err(|_| SettingsError::InvalidSeconds { field, value })
}

/// Load `.env` from the working directory. A missing file is not an error.
pub fn load_dotenv() -> Result<(), SettingsError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(error.into()),
    }
}
