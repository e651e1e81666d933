use riskline_core::{MarketDataProvider, Ticker};
use serde_json::Value;
use tracing::info;

use crate::cli::PriceArgs;
use crate::error::CliError;
use crate::settings;

pub async fn run(args: &PriceArgs, provider: &dyn MarketDataProvider) -> Result<Value, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let deadline = args
        .deadline_seconds
        .map(|value| settings::seconds("deadline_seconds", value))
        .transpose()?;

    let fact = match deadline {
        Some(deadline) => provider.last_price_within(&ticker, deadline).await?,
        None => provider.last_price(&ticker).await?,
    };
    info!(ticker = %fact.ticker(), last_price = %fact.last_price(), "resolved last price");

    Ok(serde_json::to_value(fact)?)
}
