//! Batch place-name resolution.

use clap::Args;
use tripmap::batch::BatchResolver;

use super::common::{print_report, OutputFormat, Strategy};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the resolve command.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Place names, resolved in order
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Restrict place search to this city (overrides geocoder.city)
    #[arg(long)]
    pub city: Option<String>,

    /// Resolution strategy
    #[arg(long, value_enum, default_value = "search")]
    pub strategy: Strategy,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Run the resolve command.
pub async fn run(runner: &CliRunner, args: ResolveArgs) -> Result<(), CliError> {
    runner.log_startup("resolve");

    let sdk = runner.create_sdk()?;
    let session = runner.create_session(&sdk)?;

    let report = match args.strategy {
        Strategy::Search => session.resolve_all(&args.names, args.city.as_deref()).await,
        Strategy::Geocoder => {
            let batch = BatchResolver::new(runner.config().batch_config());
            batch
                .resolve_all(&session.gateway().by_geocoder(), &args.names)
                .await
        }
    };

    print_report(&args.names, &report, args.format);
    session.destroy();
    Ok(())
}
