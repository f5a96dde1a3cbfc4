//! Driving route between resolved places.

use clap::Args;
use tripmap::coord::Location;
use tripmap::overlay::{MapSession, MarkerRequest};

use super::common::require_location;
use crate::error::CliError;
use crate::runner::{CliRunner, CliSdk};

/// Arguments for the route command.
#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Starting place name
    #[arg(long)]
    pub from: String,

    /// Destination place name
    #[arg(long)]
    pub to: String,

    /// Intermediate stops, in order (repeatable)
    #[arg(long)]
    pub via: Vec<String>,

    /// Restrict place search to this city (overrides geocoder.city)
    #[arg(long)]
    pub city: Option<String>,

    /// Also write markers and route geometry as GeoJSON
    #[arg(long, short)]
    pub output: Option<String>,
}

/// Run the route command.
///
/// Prints the provider's raw route payload.
pub async fn run(runner: &CliRunner, args: RouteArgs) -> Result<(), CliError> {
    runner.log_startup("route");

    let sdk = runner.create_sdk()?;
    let mut session = runner.create_session(&sdk)?;
    let city = args.city.as_deref();

    let start = resolve(&session, &args.from, city).await?;
    let end = resolve(&session, &args.to, city).await?;
    let mut waypoints = Vec::with_capacity(args.via.len());
    for name in &args.via {
        waypoints.push(resolve(&session, name, city).await?);
    }

    let route = session
        .draw_driving_route(&start, &end, &waypoints)
        .await
        .map_err(CliError::Route)?;

    println!("{:#}", route.0);

    if let Some(output) = &args.output {
        let stops = std::iter::once(&start)
            .chain(waypoints.iter())
            .chain(std::iter::once(&end));
        for location in stops {
            session.add_marker(MarkerRequest::new(location.clone()));
        }
        session.fit_view();
        runner.save_json(output, &session.surface().to_geojson())?;
    }

    session.destroy();
    Ok(())
}

async fn resolve(
    session: &MapSession<CliSdk>,
    name: &str,
    city: Option<&str>,
) -> Result<Location, CliError> {
    require_location(name, session.resolve_place(name, city).await)
}
