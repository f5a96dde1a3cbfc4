//! Coordinate to address.

use clap::Args;
use tripmap::coord::LngLat;
use tripmap::overlay::{ClickLocation, ReverseGeocoder};
use tripmap::sdk::MapSdk;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the reverse command.
#[derive(Debug, Args)]
pub struct ReverseArgs {
    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Search radius in meters (overrides reverse.radius)
    #[arg(long)]
    pub radius: Option<u32>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the reverse command.
pub async fn run(runner: &CliRunner, args: ReverseArgs) -> Result<(), CliError> {
    runner.log_startup("reverse");

    let position = LngLat::new(args.lng, args.lat).map_err(|e| CliError::Config(e.to_string()))?;
    let radius = args.radius.unwrap_or(runner.config().reverse.radius);

    let sdk = runner.create_sdk()?;
    let address = sdk
        .reverse_geocoder()
        .reverse(position, radius)
        .await
        .map_err(CliError::Reverse)?;

    if args.json {
        let location = ClickLocation::new(position, Some(address));
        println!("{}", serde_json::json!(location));
    } else {
        println!("{} -> {}", position, address);
    }
    Ok(())
}
