//! Geocoding gateway configuration.

use std::time::Duration;

use super::defaults::{DEFAULT_GEOCODE_TIMEOUT_MS, DEFAULT_REVERSE_RADIUS};

/// Configuration for the geocoding gateway and click reverse-resolution.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tripmap::config::GatewayConfig;
///
/// let config = GatewayConfig::new()
///     .with_geocode_timeout(Duration::from_secs(5))
///     .with_default_city("杭州");
/// assert_eq!(config.default_city(), Some("杭州"));
/// assert_eq!(config.reverse_radius(), 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// How long to wait for the geocoder callback
    geocode_timeout: Duration,
    /// City filter applied to place search when the caller gives none
    default_city: Option<String>,
    /// Search radius for reverse geocoding, in provider units (meters)
    reverse_radius: u32,
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the geocoder callback timeout. Default: 10 seconds.
    pub fn with_geocode_timeout(mut self, timeout: Duration) -> Self {
        self.geocode_timeout = timeout;
        self
    }

    /// Set the default place-search city filter.
    pub fn with_default_city(mut self, city: impl Into<String>) -> Self {
        let city = city.into();
        self.default_city = if city.trim().is_empty() {
            None
        } else {
            Some(city)
        };
        self
    }

    /// Set the reverse-geocoding radius. Default: 1000.
    pub fn with_reverse_radius(mut self, radius: u32) -> Self {
        self.reverse_radius = radius;
        self
    }

    pub fn geocode_timeout(&self) -> Duration {
        self.geocode_timeout
    }

    pub fn default_city(&self) -> Option<&str> {
        self.default_city.as_deref()
    }

    pub fn reverse_radius(&self) -> u32 {
        self.reverse_radius
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            geocode_timeout: Duration::from_millis(DEFAULT_GEOCODE_TIMEOUT_MS),
            default_city: None,
            reverse_radius: DEFAULT_REVERSE_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.geocode_timeout(), Duration::from_secs(10));
        assert!(config.default_city().is_none());
        assert_eq!(config.reverse_radius(), 1000);
    }

    #[test]
    fn test_blank_city_clears_filter() {
        let config = GatewayConfig::new()
            .with_default_city("上海")
            .with_default_city("  ");
        assert!(config.default_city().is_none());
    }

    #[test]
    fn test_builder_chain() {
        let config = GatewayConfig::new()
            .with_geocode_timeout(Duration::from_millis(250))
            .with_reverse_radius(500);
        assert_eq!(config.geocode_timeout(), Duration::from_millis(250));
        assert_eq!(config.reverse_radius(), 500);
        assert_eq!(config, config.clone());
    }
}
