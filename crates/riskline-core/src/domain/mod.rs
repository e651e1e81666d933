//! # Domain Models
//!
//! Request and result contracts for the calculation engine, plus the price
//! fact produced by market data adapters.
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StressRequest`] | Notional and shock fraction in `[0, 1]` |
//! | [`StressResult`] | Stressed value and stress loss |
//! | [`VmRequest`] | Futures position for variation margin |
//! | [`VmResult`] | Signed variation margin |
//! | [`PriceFact`] | Last traded price for a ticker |
//! | [`Ticker`] | Validated instrument code |
//!
//! ## Validation
//!
//! Construction is the only way to obtain a value and it validates every
//! bound, so a held request is always computable:
//!
//! ```rust
//! use riskline_core::{RiskErrorKind, StressRequest};
//! use rust_decimal::Decimal;
//!
//! let invalid = StressRequest::new(Decimal::ONE_HUNDRED, Decimal::TWO);
//! assert_eq!(invalid.unwrap_err().kind(), RiskErrorKind::InvalidInput);
//! ```

mod models;
mod ticker;

pub(crate) use models::{validate_non_negative, validate_positive, validate_stress_inputs};
pub use models::{PriceFact, StressRequest, StressResult, VmRequest, VmResult};
pub use ticker::Ticker;
