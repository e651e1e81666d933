use rust_decimal::Decimal;
use thiserror::Error;

use crate::http_client::HttpError;

/// Error classification exposed to callers.
///
/// Two kinds only: callers either fix their input or treat market data as
/// unavailable for this call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskErrorKind {
    InvalidInput,
    ExternalData,
}

/// Top-level error type for calculations and market data lookups.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RiskError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to fetch market data for '{ticker}' after {attempts} attempt(s): {cause}")]
    ExternalData {
        ticker: String,
        attempts: u32,
        #[source]
        cause: FetchFailure,
    },
}

impl RiskError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn external_data(ticker: impl Into<String>, attempts: u32, cause: FetchFailure) -> Self {
        Self::ExternalData {
            ticker: ticker.into(),
            attempts,
            cause,
        }
    }

    pub const fn kind(&self) -> RiskErrorKind {
        match self {
            Self::InvalidInput(_) => RiskErrorKind::InvalidInput,
            Self::ExternalData { .. } => RiskErrorKind::ExternalData,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self.kind() {
            RiskErrorKind::InvalidInput => "risk.invalid_input",
            RiskErrorKind::ExternalData => "risk.external_data",
        }
    }

    /// Last failure observed before the retry budget ran out.
    pub fn cause(&self) -> Option<&FetchFailure> {
        match self {
            Self::InvalidInput(_) => None,
            Self::ExternalData { cause, .. } => Some(cause),
        }
    }
}

/// Reason a single market data attempt failed.
///
/// Every variant is retryable; callers only ever see these wrapped in
/// [`RiskError::ExternalData`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("attempt timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("column '{0}' missing from marketdata")]
    MissingColumn(&'static str),

    #[error("marketdata contains no rows")]
    EmptyData,

    #[error("column '{0}' has no value")]
    MissingValue(&'static str),

    #[error("column '{column}' is not numeric: {raw}")]
    NonNumeric { column: &'static str, raw: String },

    #[error("price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    #[error("deadline of {deadline_ms}ms elapsed before a price was obtained")]
    DeadlineExceeded { deadline_ms: u64 },
}
