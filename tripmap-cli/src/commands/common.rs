//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use serde_json::{json, Value};
use tripmap::batch::BatchReport;
use tripmap::coord::Location;
use tripmap::gateway::GeocodingResult;

use crate::error::CliError;

/// Resolution strategy selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Keyword search over points of interest (best for named places)
    #[default]
    Search,
    /// Freeform address geocoding
    Geocoder,
}

/// Output format for resolution results.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line per input
    #[default]
    Text,
    /// JSON array
    Json,
}

/// Render one result as a single line of text.
pub fn format_result(input: &str, result: &GeocodingResult) -> String {
    match result {
        GeocodingResult::Success { location } => {
            let address = location
                .address()
                .map(|a| format!(" ({})", a))
                .unwrap_or_default();
            format!(
                "✓ {} -> {} [{}]{}",
                input,
                location.name(),
                location.position(),
                address
            )
        }
        GeocodingResult::Failure { reason } => format!("✗ {} -> {}", input, reason),
    }
}

/// Render one result as JSON, keyed by its input.
pub fn result_json(input: &str, result: &GeocodingResult) -> Value {
    match result {
        GeocodingResult::Success { location } => json!({
            "input": input,
            "success": true,
            "location": location,
        }),
        GeocodingResult::Failure { reason } => json!({
            "input": input,
            "success": false,
            "reason": reason,
        }),
    }
}

/// Print a batch report in the requested format.
pub fn print_report<S: AsRef<str>>(names: &[S], report: &BatchReport, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for (name, result) in names.iter().zip(&report.results) {
                println!("{}", format_result(name.as_ref(), result));
            }
            println!();
            println!(
                "Resolved {} of {} ({} failed, {} skipped)",
                report.succeeded,
                report.results.len(),
                report.failed,
                report.skipped
            );
        }
        OutputFormat::Json => {
            let items: Vec<Value> = names
                .iter()
                .zip(&report.results)
                .map(|(name, result)| result_json(name.as_ref(), result))
                .collect();
            println!("{}", Value::Array(items));
        }
    }
}

/// Unwrap a single result or fail the command.
pub fn require_location(input: &str, result: GeocodingResult) -> Result<Location, CliError> {
    match result {
        GeocodingResult::Success { location } => Ok(location),
        GeocodingResult::Failure { reason } => Err(CliError::Resolve {
            name: input.to_string(),
            reason,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripmap::coord::LngLat;

    fn west_lake() -> GeocodingResult {
        GeocodingResult::success(Location::with_address(
            "西湖",
            Some("龙井路1号".to_string()),
            LngLat::new(120.14, 30.25).unwrap(),
        ))
    }

    #[test]
    fn test_format_success_includes_position_and_address() {
        let line = format_result("west lake", &west_lake());
        assert!(line.starts_with("✓ west lake -> 西湖"));
        assert!(line.contains("120.14,30.25"));
        assert!(line.ends_with("(龙井路1号)"));
    }

    #[test]
    fn test_format_failure_shows_reason() {
        let line = format_result("x", &GeocodingResult::failure("timeout"));
        assert_eq!(line, "✗ x -> timeout");
    }

    #[test]
    fn test_result_json_shapes() {
        let ok = result_json("a", &west_lake());
        assert_eq!(ok["success"], true);
        assert_eq!(ok["location"]["name"], "西湖");

        let failed = result_json("b", &GeocodingResult::failure("nope"));
        assert_eq!(failed["success"], false);
        assert_eq!(failed["reason"], "nope");
    }

    #[test]
    fn test_require_location() {
        assert!(require_location("a", west_lake()).is_ok());
        let err = require_location("b", GeocodingResult::failure("nope")).unwrap_err();
        assert!(err.to_string().contains("'b'"));
    }
}
