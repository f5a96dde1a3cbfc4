//! Configuration file handling for ~/.tripmap/config.ini.
//!
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::batch::BatchConfig;
use super::gateway::GatewayConfig;
use super::settings::ConfigFile;
use crate::provider::ProxyEndpoints;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.tripmap/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.tripmap/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Proxy endpoints for the configured backend.
    pub fn endpoints(&self) -> ProxyEndpoints {
        ProxyEndpoints::new(&self.proxy.base_url)
    }

    /// Runtime gateway configuration derived from `[geocoder]` and `[reverse]`.
    pub fn gateway_config(&self) -> GatewayConfig {
        let config = GatewayConfig::new()
            .with_geocode_timeout(Duration::from_millis(self.geocoder.timeout_ms))
            .with_reverse_radius(self.reverse.radius);

        match &self.geocoder.city {
            Some(city) => config.with_default_city(city.as_str()),
            None => config,
        }
    }

    /// Runtime batch configuration derived from `[batch]`.
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig::new().with_delay(Duration::from_millis(self.batch.delay_ms))
    }
}

/// Get the path to the config directory (~/.tripmap).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tripmap")
}

/// Get the path to the config file (~/.tripmap/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::super::defaults::*;
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.proxy.base_url, crate::provider::DEFAULT_BASE_URL);
        assert!(config.proxy.bearer_token.is_none());
        assert_eq!(config.geocoder.timeout_ms, DEFAULT_GEOCODE_TIMEOUT_MS);
        assert_eq!(config.map.center, default_center());
        assert_eq!(config.map.zoom, 10.0);
        assert_eq!(config.map.pitch, 50.0);
        assert!(config.logging.file.ends_with("tripmap.log"));
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_runtime_configs() {
        let mut config = ConfigFile::default();
        config.geocoder.timeout_ms = 2500;
        config.geocoder.city = Some("西安".to_string());
        config.reverse.radius = 200;
        config.batch.delay_ms = 0;

        let gateway = config.gateway_config();
        assert_eq!(gateway.geocode_timeout(), Duration::from_millis(2500));
        assert_eq!(gateway.default_city(), Some("西安"));
        assert_eq!(gateway.reverse_radius(), 200);
        assert_eq!(config.batch_config().delay(), Duration::ZERO);
    }

    #[test]
    fn test_endpoints_from_base_url() {
        let mut config = ConfigFile::default();
        config.proxy.base_url = "https://trip.example.com/".to_string();
        assert_eq!(config.endpoints().base_url(), "https://trip.example.com");
    }

    #[test]
    fn test_config_paths() {
        assert!(config_directory().ends_with(".tripmap"));
        assert!(config_file_path().ends_with("config.ini"));
    }
}
