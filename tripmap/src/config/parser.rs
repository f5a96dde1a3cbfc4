//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::coord::LngLat;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [proxy] section
    if let Some(section) = ini.section(Some("proxy")) {
        if let Some(v) = section.get("base_url") {
            let v = v.trim();
            if !v.starts_with("http://") && !v.starts_with("https://") {
                return Err(invalid(
                    "proxy",
                    "base_url",
                    v,
                    "must be a URL starting with 'http://' or 'https://'",
                ));
            }
            config.proxy.base_url = v.to_string();
        }
        if let Some(v) = section.get("timeout") {
            config.proxy.timeout = parse_positive(v, "proxy", "timeout", "(seconds)")?;
        }
        if let Some(v) = section.get("bearer_token") {
            config.proxy.bearer_token = optional_string(v);
        }
    }

    // [geocoder] section
    if let Some(section) = ini.section(Some("geocoder")) {
        if let Some(v) = section.get("timeout_ms") {
            config.geocoder.timeout_ms =
                parse_positive(v, "geocoder", "timeout_ms", "(milliseconds)")?;
        }
        if let Some(v) = section.get("city") {
            config.geocoder.city = optional_string(v);
        }
    }

    // [batch] section
    if let Some(section) = ini.section(Some("batch")) {
        if let Some(v) = section.get("delay_ms") {
            config.batch.delay_ms = v.trim().parse().map_err(|_| {
                invalid("batch", "delay_ms", v, "must be an integer (milliseconds)")
            })?;
        }
    }

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = section.get("center") {
            config.map.center = LngLat::from_str(v)
                .map_err(|e| invalid("map", "center", v, &e.to_string()))?;
        }
        if let Some(v) = section.get("zoom") {
            config.map.zoom = parse_number(v, "map", "zoom")?;
        }
        if let Some(v) = section.get("pitch") {
            config.map.pitch = parse_number(v, "map", "pitch")?;
        }
    }

    // [reverse] section
    if let Some(section) = ini.section(Some("reverse")) {
        if let Some(v) = section.get("radius") {
            let radius = parse_positive(v, "reverse", "radius", "(meters)")?;
            config.reverse.radius = u32::try_from(radius)
                .map_err(|_| invalid("reverse", "radius", v, "value too large"))?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse an integer greater than zero.
fn parse_positive(
    value: &str,
    section: &str,
    key: &str,
    unit: &str,
) -> Result<u64, ConfigFileError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(
            section,
            key,
            value,
            &format!("must be a positive integer {}", unit),
        )),
    }
}

/// Parse a finite, non-negative number.
fn parse_number(value: &str, section: &str, key: &str) -> Result<f64, ConfigFileError> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(n),
        _ => Err(invalid(section, key, value, "must be a non-negative number")),
    }
}

/// Convert a blank string to None.
pub(super) fn optional_string(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
