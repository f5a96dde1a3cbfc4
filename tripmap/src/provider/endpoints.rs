//! Backend proxy endpoint layout.

use super::types::ProviderError;
use reqwest::Url;

/// Default backend origin used by the web client's dev proxy.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

pub const SEARCH_PATH: &str = "/api/map/search";
pub const GEOCODE_PATH: &str = "/api/map/geocode";
pub const REGEO_PATH: &str = "/api/map/regeo";
pub const DRIVING_PATH: &str = "/api/map/driving";

/// Locations of the map proxy endpoints on the backend.
///
/// The backend forwards these to the map provider's web-service API and
/// injects the provider key, so the client never holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoints {
    base_url: String,
}

impl ProxyEndpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/map/search?keywords=&city=`
    pub fn search(&self, keywords: &str, city: Option<&str>) -> Result<Url, ProviderError> {
        let mut params = vec![("keywords", keywords)];
        if let Some(city) = city {
            params.push(("city", city));
        }
        self.build(SEARCH_PATH, &params)
    }

    /// `GET /api/map/geocode?address=`
    pub fn geocode(&self, address: &str) -> Result<Url, ProviderError> {
        self.build(GEOCODE_PATH, &[("address", address)])
    }

    /// `GET /api/map/regeo?location=&radius=`
    pub fn regeo(&self, location: &str, radius: u32) -> Result<Url, ProviderError> {
        let radius = radius.to_string();
        self.build(REGEO_PATH, &[("location", location), ("radius", &radius)])
    }

    /// `GET /api/map/driving?origin=&destination=&waypoints=&strategy=`
    pub fn driving(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &str,
        strategy: u8,
    ) -> Result<Url, ProviderError> {
        let strategy = strategy.to_string();
        let mut params = vec![
            ("origin", origin),
            ("destination", destination),
            ("strategy", strategy.as_str()),
        ];
        if !waypoints.is_empty() {
            params.push(("waypoints", waypoints));
        }
        self.build(DRIVING_PATH, &params)
    }

    fn build(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ProviderError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse_with_params(&raw, params).map_err(|e| {
            ProviderError::InvalidResponse(format!("Invalid proxy URL '{}': {}", raw, e))
        })
    }
}

impl Default for ProxyEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
