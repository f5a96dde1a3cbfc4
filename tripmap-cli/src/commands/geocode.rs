//! Freeform address geocoding.

use clap::Args;

use super::common::{format_result, result_json, OutputFormat};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the geocode command.
#[derive(Debug, Args)]
pub struct GeocodeArgs {
    /// Freeform address, e.g. "北京市朝阳区阜通东大街6号"
    pub address: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Run the geocode command.
///
/// Failures, including the geocoder timeout, are reported as output rather
/// than as a command error.
pub async fn run(runner: &CliRunner, args: GeocodeArgs) -> Result<(), CliError> {
    runner.log_startup("geocode");

    let sdk = runner.create_sdk()?;
    let session = runner.create_session(&sdk)?;

    let result = session.geocode_address(&args.address).await;
    match args.format {
        OutputFormat::Text => println!("{}", format_result(&args.address, &result)),
        OutputFormat::Json => println!("{}", result_json(&args.address, &result)),
    }

    session.destroy();
    Ok(())
}
