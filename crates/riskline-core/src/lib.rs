//! # Riskline Core
//!
//! Simplified risk metrics for exchange-traded positions and a resilient
//! last-price lookup against the Moscow Exchange ISS API.
//!
//! ## Overview
//!
//! - **Calculation engine**: stress-scenario loss and futures variation margin
//!   over exact decimals, with fail-fast input validation
//! - **Request/result contracts**: value objects validated at construction
//! - **Market data port** and its MOEX adapter with bounded retry and linear
//!   backoff
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | MOEX ISS adapter |
//! | [`calculations`] | Stress and variation margin formulas |
//! | [`domain`] | Requests, results, tickers, price facts |
//! | [`error`] | `RiskError` and per-attempt failure causes |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`market_data`] | `MarketDataProvider` port |
//! | [`retry`] | Attempt budget and linear backoff schedule |
//!
//! ## Quick Start
//!
//! ```rust
//! use riskline_core::{evaluate_stress, evaluate_variation_margin, StressRequest, VmRequest};
//! use rust_decimal::Decimal;
//!
//! let stress = StressRequest::new(Decimal::new(1_000_000, 0), Decimal::new(12, 2))?;
//! let result = evaluate_stress(&stress)?;
//! assert_eq!(result.stress_loss(), Decimal::new(120_000, 0));
//!
//! let vm = VmRequest::new(3, Decimal::new(100, 0), Decimal::new(105, 0), Decimal::TEN)?;
//! assert_eq!(evaluate_variation_margin(&vm)?.variation_margin(), Decimal::new(150, 0));
//! # Ok::<(), riskline_core::RiskError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Caller   │
//! └───┬─────────┬───┘
//!     │         │
//!     ▼         ▼
//! ┌────────┐ ┌──────────────────┐     ┌──────────────────┐
//! │ Calc   │ │ MarketDataProvider│────▶│ HttpClient       │
//! │ Engine │ │ (MoexClient)      │     │ (reqwest/double) │
//! └────────┘ └──────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns `Result<_, RiskError>`:
//!
//! ```rust
//! use riskline_core::{RiskError, RiskErrorKind};
//!
//! fn handle_error(error: RiskError) {
//!     match error.kind() {
//!         RiskErrorKind::InvalidInput => {
//!             // Report to user; retrying the same input cannot succeed
//!         }
//!         RiskErrorKind::ExternalData => {
//!             // Market data unavailable for this call
//!         }
//!     }
//! }
//! ```

pub mod adapters;
pub mod calculations;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod market_data;
pub mod retry;

pub use adapters::{MoexClient, MoexConfig};

pub use calculations::{
    evaluate_stress, evaluate_variation_margin, stress_loss, stressed_value, variation_margin,
};

pub use domain::{PriceFact, StressRequest, StressResult, Ticker, VmRequest, VmResult};

pub use error::{FetchFailure, RiskError, RiskErrorKind};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use market_data::MarketDataProvider;

pub use retry::RetryPolicy;
