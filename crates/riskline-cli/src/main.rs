mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod settings;

use clap::Parser;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::error::CliError;
use crate::settings::Settings;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run() -> Result<ExitCode, CliError> {
    // Populate the environment before clap reads env-backed defaults.
    settings::load_dotenv()?;
    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli)?;
    logging::init_logging(&settings.log_level)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let data = runtime.block_on(commands::run(&cli, &settings))?;
    output::render(&data, cli.pretty)?;

    Ok(ExitCode::SUCCESS)
}
