use riskline_core::{RiskError, RiskErrorKind};
use thiserror::Error;

use crate::settings::SettingsError;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error("configuration error: {0}")]
    Config(#[from] SettingsError),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Risk(error) => match error.kind() {
                RiskErrorKind::InvalidInput => 2,
                RiskErrorKind::ExternalData => 3,
            },
            Self::Config(_) => 2,
            Self::Logging(_) => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
