//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;
use tripmap::config::ConfigFileError;
use tripmap::overlay::RouteFailure;
use tripmap::provider::ProviderError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to create the HTTP client
    HttpClient(ProviderError),
    /// The map session could not be created
    MapInit,
    /// A place could not be resolved
    Resolve { name: String, reason: String },
    /// Reverse geocoding failed
    Reverse(ProviderError),
    /// Driving route planning failed
    Route(RouteFailure),
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Reverse(ProviderError::Unauthorized) => {
                eprintln!();
                eprintln!("The map proxy rejected the session token.");
                eprintln!("  Update it with: tripmap config set proxy.bearer_token <token>");
            }
            CliError::Resolve { .. } | CliError::Reverse(ProviderError::HttpError(_)) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. Backend not running: check proxy.base_url");
                eprintln!("  2. Daily quota exhausted: retry later");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::MapInit => write!(f, "Failed to initialize map session"),
            CliError::Resolve { name, reason } => {
                write!(f, "Could not resolve '{}': {}", name, reason)
            }
            CliError::Reverse(e) => write!(f, "Reverse geocoding failed: {}", e),
            CliError::Route(e) => write!(f, "{}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::HttpClient(e) => Some(e),
            CliError::Reverse(e) => Some(e),
            CliError::Route(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}
