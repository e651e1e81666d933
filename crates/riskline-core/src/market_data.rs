//! Read-only market data port.
//!
//! Calling code depends on [`MarketDataProvider`] rather than a concrete
//! adapter, so tests and alternative venues can be swapped in without touching
//! callers.
//!
//! # Example
//!
//! ```rust,ignore
//! use riskline_core::{MarketDataProvider, RiskError, Ticker};
//!
//! async fn show_price(provider: &dyn MarketDataProvider) -> Result<(), RiskError> {
//!     let ticker = Ticker::parse("SBER")?;
//!     let fact = provider.last_price(&ticker).await?;
//!     println!("{}: {}", fact.ticker(), fact.last_price());
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::error::FetchFailure;
use crate::{PriceFact, RiskError, Ticker};

/// Source of last traded prices.
///
/// Implementations must be `Send + Sync` and hold no per-call state, so one
/// instance can serve concurrent lookups.
pub trait MarketDataProvider: Send + Sync {
    /// Resolve `ticker` to its last traded price.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::ExternalData`] once the provider has given up on
    /// the lookup. Implementations never return partial or default prices.
    fn last_price<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> Pin<Box<dyn Future<Output = Result<PriceFact, RiskError>> + Send + 'a>>;

    /// Resolve `ticker`, giving up once `deadline` elapses.
    ///
    /// An elapsed deadline is reported as [`RiskError::ExternalData`] with a
    /// [`FetchFailure::DeadlineExceeded`] cause. The default implementation
    /// cannot see individual attempts and reports zero; adapters that track
    /// attempts should override it.
    fn last_price_within<'a>(
        &'a self,
        ticker: &'a Ticker,
        deadline: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<PriceFact, RiskError>> + Send + 'a>> {
        Box::pin(async move {
            match tokio::time::timeout(deadline, self.last_price(ticker)).await {
                Ok(result) => result,
                Err(_) => Err(RiskError::external_data(
                    ticker.as_str(),
                    0,
                    FetchFailure::DeadlineExceeded {
                        deadline_ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
                    },
                )),
            }
        })
    }
}
