//! Resolve an itinerary and export its map overlays.

use clap::Args;
use serde_json::json;
use tracing::info;
use tripmap::coord::Location;
use tripmap::overlay::{MarkerRequest, PathStyle};

use super::common::{print_report, OutputFormat};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the plot command.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Place names in visiting order
    #[arg(required = true)]
    pub names: Vec<String>,

    /// GeoJSON output file
    #[arg(long, short)]
    pub output: String,

    /// Restrict place search to this city (overrides geocoder.city)
    #[arg(long)]
    pub city: Option<String>,

    /// Path stroke color
    #[arg(long)]
    pub color: Option<String>,

    /// Only place markers, without the connecting path
    #[arg(long)]
    pub no_path: bool,
}

/// Run the plot command.
///
/// Unresolved names are reported and left off the map.
pub async fn run(runner: &CliRunner, args: PlotArgs) -> Result<(), CliError> {
    runner.log_startup("plot");

    let sdk = runner.create_sdk()?;
    let mut session = runner.create_session(&sdk)?;

    let report = session.resolve_all(&args.names, args.city.as_deref()).await;
    print_report(&args.names, &report, OutputFormat::Text);

    let stops: Vec<Location> = report.locations().cloned().collect();
    for (index, location) in stops.iter().enumerate() {
        let request = MarkerRequest::new(location.clone())
            .with_label((index + 1).to_string())
            .with_custom_data(json!({ "stop": index + 1 }));
        session.add_marker(request);
    }

    if !args.no_path {
        let style = match &args.color {
            Some(color) => PathStyle::new().with_color(color.as_str()),
            None => PathStyle::default(),
        };
        session.draw_path(&stops, style);
    }
    session.fit_view();

    info!(
        markers = session.markers().len(),
        polylines = session.polylines().len(),
        "Itinerary plotted"
    );
    runner.save_json(&args.output, &session.surface().to_geojson())?;

    session.destroy();
    Ok(())
}
