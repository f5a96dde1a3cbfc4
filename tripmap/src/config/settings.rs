//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;

use crate::coord::LngLat;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub proxy: ProxySettings,
    pub geocoder: GeocoderSettings,
    pub batch: BatchSettings,
    pub map: MapSettings,
    pub reverse: ReverseSettings,
    pub logging: LoggingSettings,
}

/// Backend proxy connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    /// Base URL of the backend serving `/api/map/*`
    pub base_url: String,
    /// HTTP timeout in seconds
    pub timeout: u64,
    /// Bearer token attached to proxy requests, if any
    pub bearer_token: Option<String>,
}

/// Address geocoder and place-search defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocoderSettings {
    /// Callback timeout in milliseconds
    pub timeout_ms: u64,
    /// Default city filter for place search
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSettings {
    /// Delay between sequential resolutions in milliseconds
    pub delay_ms: u64,
}

/// Initial camera for new map sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub center: LngLat,
    pub zoom: f64,
    /// Camera pitch in degrees (3D view)
    pub pitch: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseSettings {
    /// Reverse-geocoding search radius in meters
    pub radius: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
