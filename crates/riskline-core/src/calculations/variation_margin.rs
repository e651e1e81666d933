use rust_decimal::Decimal;

use crate::domain::{validate_non_negative, validate_positive};
use crate::RiskError;

/// Simplified FORTS-style variation margin:
/// `(price_current - price_open) * contracts * lot_size`.
///
/// A zero-contract position returns zero before any validation, so malformed
/// prices or lot sizes are ignored in that case.
///
/// # Errors
///
/// [`RiskError::InvalidInput`] when, for a nonzero position, `lot_size <= 0`
/// or either price is negative.
pub fn variation_margin(
    contracts: i64,
    price_open: Decimal,
    price_current: Decimal,
    lot_size: Decimal,
) -> Result<Decimal, RiskError> {
    if contracts == 0 {
        return Ok(Decimal::ZERO);
    }

    validate_positive("lot_size", lot_size)?;
    validate_non_negative("price_open", price_open)?;
    validate_non_negative("price_current", price_current)?;

    (price_current - price_open)
        .checked_mul(Decimal::from(contracts))
        .and_then(|margin| margin.checked_mul(lot_size))
        .ok_or_else(|| {
            RiskError::invalid_input(format!(
                "variation margin for {contracts} contracts of lot {lot_size} is out of range"
            ))
        })
}
