use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::cli::{StressArgs, VmArgs};
use crate::error::CliError;

use super::stress::{self, StressResponseData};
use super::vm::{self, VmResponseData};

#[derive(Debug, Serialize)]
struct DemoResponseData {
    stress: StressResponseData,
    variation_margin: VmResponseData,
}

/// Long 1,000,000 under a 12% shock; 5 contracts of lot 10 moving 101.2 -> 99.8.
pub fn run() -> Result<Value, CliError> {
    let stress = stress::evaluate(&StressArgs {
        notional: Decimal::new(1_000_000, 0),
        shock: Decimal::new(12, 2),
    })?;
    let variation_margin = vm::evaluate(&VmArgs {
        contracts: 5,
        price_open: Decimal::new(1012, 1),
        price_current: Decimal::new(998, 1),
        lot_size: Decimal::TEN,
    })?;

    Ok(serde_json::to_value(DemoResponseData {
        stress,
        variation_margin,
    })?)
}
