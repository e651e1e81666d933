use riskline_core::{evaluate_variation_margin, VmRequest, VmResult};
use serde::Serialize;
use serde_json::Value;

use crate::cli::VmArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub(super) struct VmResponseData {
    #[serde(flatten)]
    pub request: VmRequest,
    #[serde(flatten)]
    pub result: VmResult,
}

pub fn run(args: &VmArgs) -> Result<Value, CliError> {
    let data = evaluate(args)?;
    Ok(serde_json::to_value(data)?)
}

pub(super) fn evaluate(args: &VmArgs) -> Result<VmResponseData, CliError> {
    let request = VmRequest::new(
        args.contracts,
        args.price_open,
        args.price_current,
        args.lot_size,
    )?;
    let result = evaluate_variation_margin(&request)?;
    Ok(VmResponseData { request, result })
}
