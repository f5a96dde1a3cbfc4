//! Configuration key access and validation.
//!
//! Type-safe `section.key` access used by `tripmap config get|set|list`.

use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use super::parser::{expand_tilde, optional_string};
use super::settings::ConfigFile;
use crate::coord::LngLat;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ProxyBaseUrl,
    ProxyTimeout,
    ProxyBearerToken,

    GeocoderTimeoutMs,
    GeocoderCity,

    BatchDelayMs,

    MapCenter,
    MapZoom,
    MapPitch,

    ReverseRadius,

    LoggingFile,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == lower)
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "geocoder.timeout_ms").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::ProxyBaseUrl => "proxy.base_url",
            ConfigKey::ProxyTimeout => "proxy.timeout",
            ConfigKey::ProxyBearerToken => "proxy.bearer_token",
            ConfigKey::GeocoderTimeoutMs => "geocoder.timeout_ms",
            ConfigKey::GeocoderCity => "geocoder.city",
            ConfigKey::BatchDelayMs => "batch.delay_ms",
            ConfigKey::MapCenter => "map.center",
            ConfigKey::MapZoom => "map.zoom",
            ConfigKey::MapPitch => "map.pitch",
            ConfigKey::ReverseRadius => "reverse.radius",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Get the section name (e.g., "geocoder").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "timeout_ms").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::ProxyBaseUrl => config.proxy.base_url.clone(),
            ConfigKey::ProxyTimeout => config.proxy.timeout.to_string(),
            ConfigKey::ProxyBearerToken => config.proxy.bearer_token.clone().unwrap_or_default(),
            ConfigKey::GeocoderTimeoutMs => config.geocoder.timeout_ms.to_string(),
            ConfigKey::GeocoderCity => config.geocoder.city.clone().unwrap_or_default(),
            ConfigKey::BatchDelayMs => config.batch.delay_ms.to_string(),
            ConfigKey::MapCenter => config.map.center.to_string(),
            ConfigKey::MapZoom => config.map.zoom.to_string(),
            ConfigKey::MapPitch => config.map.pitch.to_string(),
            ConfigKey::ReverseRadius => config.reverse.radius.to_string(),
            ConfigKey::LoggingFile => path_to_display(&config.logging.file),
        }
    }

    /// Set the value in a config file.
    ///
    /// Validates the value according to the key's specification before setting.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        self.validate(value)?;
        let value = value.trim();

        match self {
            ConfigKey::ProxyBaseUrl => config.proxy.base_url = value.to_string(),
            ConfigKey::ProxyTimeout => config.proxy.timeout = self.parse(value)?,
            ConfigKey::ProxyBearerToken => config.proxy.bearer_token = optional_string(value),
            ConfigKey::GeocoderTimeoutMs => config.geocoder.timeout_ms = self.parse(value)?,
            ConfigKey::GeocoderCity => config.geocoder.city = optional_string(value),
            ConfigKey::BatchDelayMs => config.batch.delay_ms = self.parse(value)?,
            ConfigKey::MapCenter => config.map.center = self.parse::<LngLat>(value)?,
            ConfigKey::MapZoom => config.map.zoom = self.parse(value)?,
            ConfigKey::MapPitch => config.map.pitch = self.parse(value)?,
            ConfigKey::ReverseRadius => config.reverse.radius = self.parse(value)?,
            ConfigKey::LoggingFile => config.logging.file = expand_tilde(value),
        }
        Ok(())
    }

    /// Validate a value according to this key's specification.
    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        self.specification()
            .is_satisfied_by(value.trim())
            .map_err(|reason| self.rejected(reason))
    }

    /// Get all supported configuration keys.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::ProxyBaseUrl,
            ConfigKey::ProxyTimeout,
            ConfigKey::ProxyBearerToken,
            ConfigKey::GeocoderTimeoutMs,
            ConfigKey::GeocoderCity,
            ConfigKey::BatchDelayMs,
            ConfigKey::MapCenter,
            ConfigKey::MapZoom,
            ConfigKey::MapPitch,
            ConfigKey::ReverseRadius,
            ConfigKey::LoggingFile,
        ]
    }

    fn specification(&self) -> Box<dyn ValueSpecification> {
        match self {
            ConfigKey::ProxyBaseUrl => Box::new(UrlSpec),
            ConfigKey::ProxyTimeout => Box::new(PositiveIntegerSpec),
            ConfigKey::ProxyBearerToken => Box::new(AnyStringSpec),
            ConfigKey::GeocoderTimeoutMs => Box::new(PositiveIntegerSpec),
            ConfigKey::GeocoderCity => Box::new(AnyStringSpec),
            ConfigKey::BatchDelayMs => Box::new(IntegerSpec),
            ConfigKey::MapCenter => Box::new(CoordinateSpec),
            ConfigKey::MapZoom => Box::new(NonNegativeNumberSpec),
            ConfigKey::MapPitch => Box::new(NonNegativeNumberSpec),
            ConfigKey::ReverseRadius => Box::new(PositiveIntegerSpec),
            ConfigKey::LoggingFile => Box::new(PathSpec),
        }
    }

    fn parse<T: FromStr>(&self, value: &str) -> Result<T, ConfigKeyError> {
        value
            .parse()
            .map_err(|_| self.rejected(format!("cannot parse '{}'", value)))
    }

    fn rejected(&self, reason: String) -> ConfigKeyError {
        ConfigKeyError::ValidationFailed {
            key: self.name().to_string(),
            reason,
        }
    }
}

// ============================================================================
// Value Specifications
// ============================================================================

trait ValueSpecification {
    /// Returns Ok(()) if valid, Err(reason) if invalid.
    fn is_satisfied_by(&self, value: &str) -> Result<(), String>;
}

struct AnyStringSpec;

impl ValueSpecification for AnyStringSpec {
    fn is_satisfied_by(&self, _value: &str) -> Result<(), String> {
        Ok(())
    }
}

struct UrlSpec;

impl ValueSpecification for UrlSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(())
        } else {
            Err("must be a URL starting with 'http://' or 'https://'".to_string())
        }
    }
}

/// Unsigned integer, zero allowed.
struct IntegerSpec;

impl ValueSpecification for IntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        value
            .parse::<u64>()
            .map(|_| ())
            .map_err(|_| "must be a non-negative integer".to_string())
    }
}

struct PositiveIntegerSpec;

impl ValueSpecification for PositiveIntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<u32>() {
            Ok(n) if n > 0 => Ok(()),
            _ => Err("must be a positive integer".to_string()),
        }
    }
}

struct NonNegativeNumberSpec;

impl ValueSpecification for NonNegativeNumberSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Ok(()),
            _ => Err("must be a non-negative number".to_string()),
        }
    }
}

/// `lng,lat` pair.
struct CoordinateSpec;

impl ValueSpecification for CoordinateSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        value
            .parse::<LngLat>()
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

struct PathSpec;

impl ValueSpecification for PathSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            Err("must be a valid path".to_string())
        } else {
            Ok(())
        }
    }
}

/// Convert path to display string, collapsing home dir to ~.
fn path_to_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_key_parsing() {
        assert_eq!(
            "proxy.base_url".parse::<ConfigKey>().unwrap(),
            ConfigKey::ProxyBaseUrl
        );
        assert_eq!(
            "GEOCODER.CITY".parse::<ConfigKey>().unwrap(),
            ConfigKey::GeocoderCity
        );
        assert!(matches!(
            "map.bearing".parse::<ConfigKey>(),
            Err(ConfigKeyError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_key_name_parts() {
        assert_eq!(ConfigKey::GeocoderTimeoutMs.section(), "geocoder");
        assert_eq!(ConfigKey::GeocoderTimeoutMs.key_name(), "timeout_ms");
    }

    #[test]
    fn test_get_value() {
        let config = ConfigFile::default();
        assert_eq!(ConfigKey::BatchDelayMs.get(&config), "500");
        assert_eq!(ConfigKey::MapCenter.get(&config), "116.397428,39.90923");
        assert_eq!(ConfigKey::ProxyBearerToken.get(&config), "");
    }

    #[test]
    fn test_set_value() {
        let mut config = ConfigFile::default();

        ConfigKey::MapCenter.set(&mut config, "121.47, 31.23").unwrap();
        ConfigKey::GeocoderCity.set(&mut config, "上海").unwrap();
        ConfigKey::BatchDelayMs.set(&mut config, "0").unwrap();

        assert_eq!(config.map.center, LngLat::new(121.47, 31.23).unwrap());
        assert_eq!(config.geocoder.city, Some("上海".to_string()));
        assert_eq!(config.batch.delay_ms, 0);
    }

    #[test]
    fn test_clear_optional_value() {
        let mut config = ConfigFile::default();
        ConfigKey::ProxyBearerToken.set(&mut config, "tok").unwrap();
        assert_eq!(config.proxy.bearer_token, Some("tok".to_string()));

        ConfigKey::ProxyBearerToken.set(&mut config, "").unwrap();
        assert!(config.proxy.bearer_token.is_none());
    }

    #[test]
    fn test_set_invalid_value_fails() {
        let mut config = ConfigFile::default();

        assert!(ConfigKey::ProxyBaseUrl.set(&mut config, "ftp://x").is_err());
        assert!(ConfigKey::GeocoderTimeoutMs.set(&mut config, "0").is_err());
        assert!(ConfigKey::MapZoom.set(&mut config, "-1").is_err());
        assert!(ConfigKey::MapCenter.set(&mut config, "north").is_err());
        assert!(ConfigKey::LoggingFile.set(&mut config, "  ").is_err());

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_all_keys_roundtrip_names() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
        }
        assert_eq!(ConfigKey::all().len(), 11);
    }
}
