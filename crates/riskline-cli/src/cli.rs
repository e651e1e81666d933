//! CLI argument definitions for riskline.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `stress` | Stressed value and loss for a position |
//! | `vm` | Variation margin for a futures position |
//! | `price` | Last traded price from MOEX ISS |
//! | `demo` | Sample stress and VM scenario |
//!
//! # Global Options
//!
//! Every connection option can also be set through the environment (or a
//! `.env` file in the working directory):
//!
//! | Option | Environment | Default |
//! |--------|-------------|---------|
//! | `--moex-base-url` | `MOEX_BASE_URL` | `https://iss.moex.com` |
//! | `--http-timeout-seconds` | `HTTP_TIMEOUT_SECONDS` | `5` |
//! | `--http-retry-count` | `HTTP_RETRY_COUNT` | `3` |
//! | `--http-retry-backoff-seconds` | `HTTP_RETRY_BACKOFF_SECONDS` | `0.5` |
//! | `--log-level` | `LOG_LEVEL` | `info` |
//!
//! # Examples
//!
//! ```bash
//! riskline stress --notional 1000000 --shock 0.12
//! riskline vm --contracts 5 --price-open 101.2 --price-current 99.8 --lot-size 10
//! riskline price SBER --pretty
//! ```

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

/// Stress loss, variation margin and MOEX last prices.
#[derive(Debug, Parser)]
#[command(name = "riskline", author, version, about)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Log filter used when RUST_LOG is not set (e.g. `warn`, `riskline_core=debug`).
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// MOEX connection options.
#[derive(Debug, Clone, Args)]
pub struct ConnectionArgs {
    /// Base URL of the ISS API.
    #[arg(long, global = true, env = "MOEX_BASE_URL", default_value = "https://iss.moex.com")]
    pub moex_base_url: String,

    /// Per-attempt HTTP timeout in seconds.
    #[arg(long, global = true, env = "HTTP_TIMEOUT_SECONDS", default_value_t = 5.0)]
    pub http_timeout_seconds: f64,

    /// Total number of attempts per price lookup.
    #[arg(long, global = true, env = "HTTP_RETRY_COUNT", default_value_t = 3)]
    pub http_retry_count: u32,

    /// Base delay for linear backoff; attempt `n` waits `n * base`.
    #[arg(long, global = true, env = "HTTP_RETRY_BACKOFF_SECONDS", default_value_t = 0.5)]
    pub http_retry_backoff_seconds: f64,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Stressed value and stress loss under a sell shock.
    ///
    /// # Examples
    ///
    ///   riskline stress --notional 1000000 --shock 0.12
    Stress(StressArgs),

    /// Variation margin for a futures position.
    ///
    /// Use a negative contract count for short positions.
    ///
    /// # Examples
    ///
    ///   riskline vm --contracts 5 --price-open 101.2 --price-current 99.8 --lot-size 10
    ///   riskline vm --contracts=-2 --price-open 80 --price-current 82 --lot-size 100
    Vm(VmArgs),

    /// Last traded price for a MOEX shares ticker.
    ///
    /// # Examples
    ///
    ///   riskline price SBER
    ///   riskline price GAZP --deadline-seconds 3
    Price(PriceArgs),

    /// Run the sample stress and variation margin scenario.
    Demo,
}

#[derive(Debug, Args)]
pub struct StressArgs {
    /// Position notional in currency units (non-negative).
    #[arg(long)]
    pub notional: Decimal,

    /// Shock as a fraction in [0, 1] (0.12 is a 12% drop).
    #[arg(long)]
    pub shock: Decimal,
}

#[derive(Debug, Args)]
pub struct VmArgs {
    /// Number of contracts; negative for a short position.
    #[arg(long, allow_negative_numbers = true)]
    pub contracts: i64,

    #[arg(long)]
    pub price_open: Decimal,

    #[arg(long)]
    pub price_current: Decimal,

    /// Contract lot size (positive).
    #[arg(long)]
    pub lot_size: Decimal,
}

#[derive(Debug, Args)]
pub struct PriceArgs {
    /// Instrument ticker (e.g. SBER, GAZP).
    pub ticker: String,

    /// Abort the lookup, including pending retries, after this many seconds.
    #[arg(long)]
    pub deadline_seconds: Option<f64>,
}
