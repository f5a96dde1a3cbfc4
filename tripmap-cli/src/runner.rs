//! CLI runner for common setup and operations.
//!
//! Encapsulates logging initialization, SDK construction, session creation and
//! file output to reduce duplication across command handlers.

use crate::error::CliError;
use serde_json::Value;
use tracing::info;
use tripmap::config::ConfigFile;
use tripmap::logging::{init_logging, LoggingGuard};
use tripmap::overlay::{init_map, MapSession};
use tripmap::provider::{Anonymous, AsyncReqwestClient, AuthorizedClient, Credentials, StaticToken};
use tripmap::sdk::{HeadlessSdk, MapOptions};

/// Credentials taken from `proxy.bearer_token`.
#[derive(Debug, Clone)]
pub enum ConfiguredCredentials {
    Anonymous(Anonymous),
    Token(StaticToken),
}

impl ConfiguredCredentials {
    pub fn from_config(config: &ConfigFile) -> Self {
        match &config.proxy.bearer_token {
            Some(token) => ConfiguredCredentials::Token(StaticToken::new(token.clone())),
            None => ConfiguredCredentials::Anonymous(Anonymous),
        }
    }
}

impl Credentials for ConfiguredCredentials {
    fn bearer_token(&self) -> Option<String> {
        match self {
            ConfiguredCredentials::Anonymous(c) => c.bearer_token(),
            ConfiguredCredentials::Token(c) => c.bearer_token(),
        }
    }

    fn notify_unauthorized(&self) {
        match self {
            ConfiguredCredentials::Anonymous(c) => c.notify_unauthorized(),
            ConfiguredCredentials::Token(c) => c.notify_unauthorized(),
        }
    }
}

/// HTTP client used by every CLI command.
pub type CliClient = AuthorizedClient<AsyncReqwestClient, ConfiguredCredentials>;

/// SDK used by every CLI command.
pub type CliSdk = HeadlessSdk<CliClient>;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner with optional debug logging.
    ///
    /// Logs go to the configured file. With `debug_mode` they are also
    /// mirrored to stdout at debug level regardless of RUST_LOG defaults.
    pub fn with_debug(debug_mode: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let logging_guard = init_logging(&config.logging.file, debug_mode, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("tripmap v{}", tripmap::VERSION);
        info!(
            command,
            proxy = %self.config.proxy.base_url,
            "tripmap CLI starting"
        );
    }

    /// Create the SDK, wiring configured credentials into the HTTP client.
    pub fn create_sdk(&self) -> Result<CliSdk, CliError> {
        let http = AsyncReqwestClient::with_timeout(self.config.proxy.timeout)
            .map_err(CliError::HttpClient)?;
        let client = AuthorizedClient::new(http, ConfiguredCredentials::from_config(&self.config));
        Ok(HeadlessSdk::new(client, self.config.endpoints()))
    }

    /// Create a map session from the configured map settings.
    pub fn create_session(&self, sdk: &CliSdk) -> Result<MapSession<CliSdk>, CliError> {
        init_map(sdk, &MapOptions::from_config(&self.config)).ok_or(CliError::MapInit)
    }

    /// Write a JSON document to `path`, pretty-printed.
    pub fn save_json(&self, path: &str, document: &Value) -> Result<(), CliError> {
        let text = serde_json::to_string_pretty(document).map_err(|e| CliError::FileWrite {
            path: path.to_string(),
            error: e.into(),
        })?;

        std::fs::write(path, text.as_bytes()).map_err(|e| CliError::FileWrite {
            path: path.to_string(),
            error: e,
        })?;

        info!(path, bytes = text.len(), "Output written");
        println!("✓ Saved: {}", path);
        Ok(())
    }
}
