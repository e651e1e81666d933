use rust_decimal::Decimal;

use crate::domain::validate_stress_inputs;
use crate::RiskError;

/// Position value after a sell shock of `shock_fraction` (0.10 is a 10% drop).
///
/// No rounding is applied.
///
/// # Errors
///
/// [`RiskError::InvalidInput`] when `notional < 0` or `shock_fraction` is
/// outside `[0, 1]`; the message names the bound that failed.
pub fn stressed_value(notional: Decimal, shock_fraction: Decimal) -> Result<Decimal, RiskError> {
    validate_stress_inputs(notional, shock_fraction)?;
    notional
        .checked_mul(Decimal::ONE - shock_fraction)
        .ok_or_else(|| RiskError::invalid_input(format!("notional {notional} is out of range")))
}

/// Loss under the stress scenario: `notional - stressed_value`.
pub fn stress_loss(notional: Decimal, shock_fraction: Decimal) -> Result<Decimal, RiskError> {
    let stressed = stressed_value(notional, shock_fraction)?;
    Ok(notional - stressed)
}
