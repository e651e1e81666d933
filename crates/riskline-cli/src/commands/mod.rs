mod demo;
mod price;
mod stress;
mod vm;

use riskline_core::MoexClient;
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::settings::Settings;

pub async fn run(cli: &Cli, settings: &Settings) -> Result<Value, CliError> {
    match &cli.command {
        Command::Stress(args) => stress::run(args),
        Command::Vm(args) => vm::run(args),
        Command::Price(args) => {
            let client = MoexClient::new(settings.moex.clone());
            price::run(args, &client).await
        }
        Command::Demo => demo::run(),
    }
}
