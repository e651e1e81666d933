//! MOEX ISS adapter.
//!
//! Fetches `GET {base_url}/iss/engines/stock/markets/shares/securities/{ticker}.json`
//! and reads the `LAST` cell of the first `marketdata` row. Every failure mode
//! (transport, timeout, status, payload shape) is retried under the configured
//! [`RetryPolicy`] and surfaces as a single [`RiskError::ExternalData`].

use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FetchFailure;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::market_data::MarketDataProvider;
use crate::retry::RetryPolicy;
use crate::{PriceFact, RiskError, Ticker};

pub const DEFAULT_BASE_URL: &str = "https://iss.moex.com";

const SECURITIES_PATH: &str = "/iss/engines/stock/markets/shares/securities";
const LAST_COLUMN: &str = "LAST";

/// Immutable connection settings for [`MoexClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoexConfig {
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Default for MoexConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }
}

impl MoexConfig {
    /// # Errors
    ///
    /// [`RiskError::InvalidInput`] when the base URL is not http(s), the
    /// timeout is zero, or `retries` is zero.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        retries: u32,
        backoff_base: Duration,
    ) -> Result<Self, RiskError> {
        let base_url = base_url.into();
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(RiskError::invalid_input(format!(
                "base url must start with http:// or https://, got '{base_url}'"
            )));
        }
        if timeout.is_zero() {
            return Err(RiskError::invalid_input("http timeout must be positive"));
        }

        Ok(Self {
            base_url: base_url.to_owned(),
            timeout,
            retry: RetryPolicy::new(retries, backoff_base)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub const fn retry(&self) -> RetryPolicy {
        self.retry
    }

    pub fn securities_url(&self, ticker: &Ticker) -> String {
        format!(
            "{}{SECURITIES_PATH}/{}.json",
            self.base_url,
            urlencoding::encode(ticker.as_str())
        )
    }
}

/// HTTP-backed [`MarketDataProvider`] for the Moscow Exchange ISS API.
///
/// Stateless apart from its configuration; clones share the transport.
#[derive(Clone)]
pub struct MoexClient {
    config: MoexConfig,
    http_client: Arc<dyn HttpClient>,
}

impl MoexClient {
    pub fn new(config: MoexConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::default()))
    }

    pub fn with_http_client(config: MoexConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &MoexConfig {
        &self.config
    }

    /// Fetch the last price, retrying until the attempt budget is spent.
    pub async fn fetch_last_price(&self, ticker: &Ticker) -> Result<PriceFact, RiskError> {
        let attempts = AtomicU32::new(0);
        self.fetch_with_retries(ticker, &attempts).await
    }

    /// Like [`fetch_last_price`](Self::fetch_last_price) but gives up once
    /// `deadline` elapses, even mid-backoff.
    pub async fn fetch_last_price_within(
        &self,
        ticker: &Ticker,
        deadline: Duration,
    ) -> Result<PriceFact, RiskError> {
        let attempts = AtomicU32::new(0);
        match tokio::time::timeout(deadline, self.fetch_with_retries(ticker, &attempts)).await {
            Ok(result) => result,
            Err(_) => {
                let deadline_ms = millis(deadline);
                let attempts = attempts.load(Ordering::Relaxed);
                warn!(ticker = %ticker, attempts, deadline_ms, "MOEX lookup abandoned at deadline");
                Err(RiskError::external_data(
                    ticker.as_str(),
                    attempts,
                    FetchFailure::DeadlineExceeded { deadline_ms },
                ))
            }
        }
    }

    async fn fetch_with_retries(
        &self,
        ticker: &Ticker,
        attempts: &AtomicU32,
    ) -> Result<PriceFact, RiskError> {
        let url = self.config.securities_url(ticker);
        let policy = self.config.retry;
        let mut attempt = 1;

        loop {
            attempts.store(attempt, Ordering::Relaxed);
            debug!(ticker = %ticker, attempt, url = %url, "requesting MOEX last price");

            match self.attempt(ticker, &url).await {
                Ok(fact) => {
                    debug!(
                        ticker = %ticker,
                        attempt,
                        price = %fact.last_price(),
                        "MOEX last price received"
                    );
                    return Ok(fact);
                }
                Err(failure) => {
                    if policy.is_final(attempt) {
                        debug!(
                            ticker = %ticker,
                            attempt,
                            error = %failure,
                            "MOEX retry budget spent"
                        );
                        return Err(RiskError::external_data(ticker.as_str(), attempt, failure));
                    }
                    let delay = policy.delay_after(attempt);
                    warn!(
                        ticker = %ticker,
                        attempt,
                        retries = policy.attempts(),
                        delay_ms = millis(delay),
                        error = %failure,
                        "MOEX request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt(&self, ticker: &Ticker, url: &str) -> Result<PriceFact, FetchFailure> {
        let timeout = self.config.timeout;
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout(timeout);

        // Enforced here as well so transports without their own timeout are bounded.
        let response = tokio::time::timeout(timeout, self.http_client.execute(request))
            .await
            .map_err(|_| FetchFailure::Timeout {
                timeout_ms: millis(timeout),
            })??;

        if !response.is_success() {
            return Err(FetchFailure::Status(response.status));
        }

        let price = parse_last_price(&response.body)?;
        PriceFact::new(ticker.clone(), price).map_err(|_| FetchFailure::NonPositivePrice(price))
    }
}

impl MarketDataProvider for MoexClient {
    fn last_price<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> Pin<Box<dyn Future<Output = Result<PriceFact, RiskError>> + Send + 'a>> {
        Box::pin(self.fetch_last_price(ticker))
    }

    fn last_price_within<'a>(
        &'a self,
        ticker: &'a Ticker,
        deadline: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<PriceFact, RiskError>> + Send + 'a>> {
        Box::pin(self.fetch_last_price_within(ticker, deadline))
    }
}

/// ISS security document; only the `marketdata` block is read.
#[derive(Debug, Clone, Deserialize)]
struct IssSecurityResponse {
    marketdata: Option<IssTable>,
}

/// ISS tabular block: column names plus rows aligned to them.
#[derive(Debug, Clone, Deserialize)]
struct IssTable {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<Vec<Value>>,
}

impl IssTable {
    fn first_row_cell(&self, column: &'static str) -> Result<&Value, FetchFailure> {
        let index = self
            .columns
            .iter()
            .position(|name| name == column)
            .ok_or(FetchFailure::MissingColumn(column))?;
        let row = self.data.first().ok_or(FetchFailure::EmptyData)?;
        row.get(index).ok_or(FetchFailure::MissingValue(column))
    }
}

fn parse_last_price(body: &str) -> Result<Decimal, FetchFailure> {
    let response: IssSecurityResponse = serde_json::from_str(body)
        .map_err(|e| FetchFailure::MalformedPayload(format!("failed to parse ISS response: {e}")))?;
    let table = response.marketdata.ok_or_else(|| {
        FetchFailure::MalformedPayload(String::from("response has no 'marketdata' block"))
    })?;

    let price = decimal_cell(LAST_COLUMN, table.first_row_cell(LAST_COLUMN)?)?;
    if price <= Decimal::ZERO {
        return Err(FetchFailure::NonPositivePrice(price));
    }
    Ok(price)
}

fn decimal_cell(column: &'static str, cell: &Value) -> Result<Decimal, FetchFailure> {
    let raw = match cell {
        Value::Null => return Err(FetchFailure::MissingValue(column)),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_owned(),
        other => {
            return Err(FetchFailure::NonNumeric {
                column,
                raw: other.to_string(),
            })
        }
    };

    match Decimal::from_str(&raw).or_else(|_| Decimal::from_scientific(&raw)) {
        Ok(value) => Ok(value),
        Err(_) => Err(FetchFailure::NonNumeric { column, raw }),
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
