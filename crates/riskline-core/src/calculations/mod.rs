//! Calculation engine.
//!
//! Pure, re-entrant formulas. Each function validates its own inputs and fails
//! fast with [`RiskError::InvalidInput`]; the `evaluate_*` functions run the
//! same formulas over already validated request contracts.

mod stress;
mod variation_margin;

pub use stress::{stress_loss, stressed_value};
pub use variation_margin::variation_margin;

use crate::{RiskError, StressRequest, StressResult, VmRequest, VmResult};

/// Compute stressed value and stress loss for one scenario.
pub fn evaluate_stress(request: &StressRequest) -> Result<StressResult, RiskError> {
    let notional = request.notional();
    let shock_fraction = request.shock_fraction();

    let stressed = stressed_value(notional, shock_fraction)?;
    let loss = stress_loss(notional, shock_fraction)?;

    Ok(StressResult::new(stressed, loss))
}

/// Compute the variation margin for one futures position.
pub fn evaluate_variation_margin(request: &VmRequest) -> Result<VmResult, RiskError> {
    let margin = variation_margin(
        request.contracts(),
        request.price_open(),
        request.price_current(),
        request.lot_size(),
    )?;

    Ok(VmResult::new(margin))
}
