use rust_decimal::Decimal;
use serde::Serialize;

use crate::{RiskError, Ticker};

/// Stress scenario input: a position notional and the fractional price shock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StressRequest {
    notional: Decimal,
    shock_fraction: Decimal,
}

impl StressRequest {
    pub fn new(notional: Decimal, shock_fraction: Decimal) -> Result<Self, RiskError> {
        validate_stress_inputs(notional, shock_fraction)?;
        Ok(Self {
            notional,
            shock_fraction,
        })
    }

    pub const fn notional(&self) -> Decimal {
        self.notional
    }

    pub const fn shock_fraction(&self) -> Decimal {
        self.shock_fraction
    }
}

/// Position value after the shock and the loss it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StressResult {
    stressed_value: Decimal,
    stress_loss: Decimal,
}

impl StressResult {
    pub(crate) const fn new(stressed_value: Decimal, stress_loss: Decimal) -> Self {
        Self {
            stressed_value,
            stress_loss,
        }
    }

    pub const fn stressed_value(&self) -> Decimal {
        self.stressed_value
    }

    pub const fn stress_loss(&self) -> Decimal {
        self.stress_loss
    }
}

/// Futures position for a variation margin calculation.
///
/// Negative `contracts` represent a short position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VmRequest {
    contracts: i64,
    price_open: Decimal,
    price_current: Decimal,
    lot_size: Decimal,
}

impl VmRequest {
    /// Price and lot size bounds are checked even for a zero-contract
    /// position; only the raw formula short-circuits on zero contracts.
    pub fn new(
        contracts: i64,
        price_open: Decimal,
        price_current: Decimal,
        lot_size: Decimal,
    ) -> Result<Self, RiskError> {
        validate_positive("lot_size", lot_size)?;
        validate_non_negative("price_open", price_open)?;
        validate_non_negative("price_current", price_current)?;

        Ok(Self {
            contracts,
            price_open,
            price_current,
            lot_size,
        })
    }

    pub const fn contracts(&self) -> i64 {
        self.contracts
    }

    pub const fn price_open(&self) -> Decimal {
        self.price_open
    }

    pub const fn price_current(&self) -> Decimal {
        self.price_current
    }

    pub const fn lot_size(&self) -> Decimal {
        self.lot_size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VmResult {
    variation_margin: Decimal,
}

impl VmResult {
    pub(crate) const fn new(variation_margin: Decimal) -> Self {
        Self { variation_margin }
    }

    /// Signed margin: positive is a gain for the position holder.
    pub const fn variation_margin(&self) -> Decimal {
        self.variation_margin
    }
}

/// Last traded price for a ticker as reported by the market data service.
///
/// `ticker` is the normalized [`Ticker`], so a lookup for `sber` reports `SBER`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceFact {
    ticker: Ticker,
    last_price: Decimal,
}

impl PriceFact {
    pub fn new(ticker: Ticker, last_price: Decimal) -> Result<Self, RiskError> {
        if last_price <= Decimal::ZERO {
            return Err(RiskError::invalid_input(format!(
                "last_price must be positive, got {last_price}"
            )));
        }
        Ok(Self { ticker, last_price })
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub const fn last_price(&self) -> Decimal {
        self.last_price
    }
}

pub(crate) fn validate_stress_inputs(
    notional: Decimal,
    shock_fraction: Decimal,
) -> Result<(), RiskError> {
    validate_non_negative("notional", notional)?;
    if shock_fraction < Decimal::ZERO || shock_fraction > Decimal::ONE {
        return Err(RiskError::invalid_input(format!(
            "shock_fraction must be between 0 and 1, got {shock_fraction}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_non_negative(field: &'static str, value: Decimal) -> Result<(), RiskError> {
    if value < Decimal::ZERO {
        return Err(RiskError::invalid_input(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_positive(field: &'static str, value: Decimal) -> Result<(), RiskError> {
    if value <= Decimal::ZERO {
        return Err(RiskError::invalid_input(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(())
}
