use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Install the stderr subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) -> Result<(), CliError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level).map_err(|error| {
            CliError::Logging(format!("invalid log level '{default_level}': {error}"))
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|error| CliError::Logging(error.to_string()))
}
