//! tripmap CLI - Command-line interface
//!
//! This binary provides a command-line interface to the tripmap library:
//! resolve itinerary place names, plot them as map overlays, plan driving
//! routes and manage configuration.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::geocode::GeocodeArgs;
use commands::plot::PlotArgs;
use commands::resolve::ResolveArgs;
use commands::reverse::ReverseArgs;
use commands::route::RouteArgs;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "tripmap")]
#[command(version = tripmap::VERSION)]
#[command(about = "Resolve and map travel itineraries", long_about = None)]
struct Cli {
    /// Enable debug logging (also mirrored to stdout)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve place names to coordinates
    Resolve(ResolveArgs),

    /// Geocode a freeform address
    Geocode(GeocodeArgs),

    /// Look up the address at a coordinate
    Reverse(ReverseArgs),

    /// Resolve an itinerary and write its markers and path as GeoJSON
    Plot(PlotArgs),

    /// Plan a driving route between places
    Route(RouteArgs),

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        e.exit();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let command = match cli.command {
        Commands::Config { command } => return commands::config::run(command),
        other => other,
    };

    let runner = CliRunner::with_debug(cli.debug)?;

    match command {
        Commands::Resolve(args) => commands::resolve::run(&runner, args).await,
        Commands::Geocode(args) => commands::geocode::run(&runner, args).await,
        Commands::Reverse(args) => commands::reverse::run(&runner, args).await,
        Commands::Plot(args) => commands::plot::run(&runner, args).await,
        Commands::Route(args) => commands::route::run(&runner, args).await,
        Commands::Config { .. } => Ok(()),
    }
}
