use riskline_core::{evaluate_stress, StressRequest, StressResult};
use serde::Serialize;
use serde_json::Value;

use crate::cli::StressArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub(super) struct StressResponseData {
    #[serde(flatten)]
    pub request: StressRequest,
    #[serde(flatten)]
    pub result: StressResult,
}

pub fn run(args: &StressArgs) -> Result<Value, CliError> {
    let data = evaluate(args)?;
    Ok(serde_json::to_value(data)?)
}

pub(super) fn evaluate(args: &StressArgs) -> Result<StressResponseData, CliError> {
    let request = StressRequest::new(args.notional, args.shock)?;
    let result = evaluate_stress(&request)?;
    Ok(StressResponseData { request, result })
}
