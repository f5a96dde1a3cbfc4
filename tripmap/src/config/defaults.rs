//! Default values for all configuration settings.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::coord::LngLat;
use crate::provider::{DEFAULT_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS};

/// Default geocoder callback timeout in milliseconds.
pub const DEFAULT_GEOCODE_TIMEOUT_MS: u64 = 10_000;

/// Default delay between batch resolutions in milliseconds.
pub const DEFAULT_BATCH_DELAY_MS: u64 = 500;

/// Default reverse-geocoding search radius.
pub const DEFAULT_REVERSE_RADIUS: u32 = 1000;

/// Default map center longitude (Beijing).
pub const DEFAULT_CENTER_LNG: f64 = 116.397428;

/// Default map center latitude (Beijing).
pub const DEFAULT_CENTER_LAT: f64 = 39.90923;

/// Default map zoom level.
pub const DEFAULT_ZOOM: f64 = 10.0;

/// Default camera pitch in degrees.
pub const DEFAULT_PITCH: f64 = 50.0;

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "tripmap.log";

/// Default map center as a coordinate.
pub fn default_center() -> LngLat {
    LngLat {
        lng: DEFAULT_CENTER_LNG,
        lat: DEFAULT_CENTER_LAT,
    }
}

/// Default log file path (~/.tripmap/tripmap.log).
pub fn default_log_file() -> PathBuf {
    config_directory().join(DEFAULT_LOG_FILE_NAME)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            proxy: ProxySettings {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout: DEFAULT_HTTP_TIMEOUT_SECS,
                bearer_token: None,
            },
            geocoder: GeocoderSettings {
                timeout_ms: DEFAULT_GEOCODE_TIMEOUT_MS,
                city: None,
            },
            batch: BatchSettings {
                delay_ms: DEFAULT_BATCH_DELAY_MS,
            },
            map: MapSettings {
                center: default_center(),
                zoom: DEFAULT_ZOOM,
                pitch: DEFAULT_PITCH,
            },
            reverse: ReverseSettings {
                radius: DEFAULT_REVERSE_RADIUS,
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
        }
    }
}
