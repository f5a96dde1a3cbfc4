//! Geocoding gateway
//!
//! Resolves free-text place names to coordinates through two independent
//! strategies:
//!
//! - **Place search** (preferred): keyword search over the provider's POI
//!   index, accurate for named attractions, hotels and restaurants.
//! - **Geocoder** (retained for compatibility): freeform address geocoding
//!   through a callback-style geocoder guarded by a timeout.
//!
//! The gateway does not pick between them; callers choose by input shape,
//! either directly or by handing a [`Resolver`] strategy to the batch driver.
//!
//! ```ignore
//! use tripmap::gateway::{GeocodingGateway, ProxyGeocoder, ProxyPlaceSearch};
//!
//! let gateway = GeocodingGateway::new(
//!     ProxyPlaceSearch::new(client.clone(), endpoints.clone()),
//!     ProxyGeocoder::new(client, endpoints),
//!     GatewayConfig::default(),
//! );
//! let result = gateway.resolve_place("西湖", Some("杭州")).await;
//! ```

mod geocoder;
mod place_search;
mod result;
mod wire;

pub use geocoder::{
    geocode_with_timeout, GeocodeCallback, GeocodeCandidate, GeocodeReply, GeocodeStatus,
    Geocoder, ProxyGeocoder, DEFAULT_GEOCODE_TIMEOUT,
};
pub use place_search::{PlaceSearch, ProxyPlaceSearch};
pub use result::{GeocodingResult, TIMEOUT_REASON};

pub(crate) use wire::{describe_status, RegeoResponse, STATUS_OK};

use std::future::Future;

use tracing::debug;

use crate::config::GatewayConfig;

/// Something that turns one place name into a [`GeocodingResult`].
pub trait Resolver: Send + Sync {
    fn resolve(&self, name: &str) -> impl Future<Output = GeocodingResult> + Send;
}

/// Owns one place-search and one geocoder sub-service.
pub struct GeocodingGateway<P, G> {
    place_search: P,
    geocoder: G,
    config: GatewayConfig,
}

impl<P, G> GeocodingGateway<P, G>
where
    P: PlaceSearch,
    G: Geocoder,
{
    pub fn new(place_search: P, geocoder: G, config: GatewayConfig) -> Self {
        Self {
            place_search,
            geocoder,
            config,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Resolves a named place through place search.
    ///
    /// `city` overrides the configured default city filter.
    pub async fn resolve_place(&self, keyword: &str, city: Option<&str>) -> GeocodingResult {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return GeocodingResult::failure("empty place name");
        }

        let city = city.or(self.config.default_city());
        debug!(keyword, city, "Resolving place");
        self.place_search.search(keyword, city).await
    }

    /// Geocodes a freeform address through the callback geocoder.
    ///
    /// Retained for compatibility; prefer [`resolve_place`](Self::resolve_place)
    /// for named points of interest. Settles to `Failure{"timeout"}` when the
    /// geocoder stays silent past the configured bound.
    pub async fn geocode_address(&self, address: &str) -> GeocodingResult {
        let address = address.trim();
        if address.is_empty() {
            return GeocodingResult::failure("empty address");
        }

        geocode_with_timeout(&self.geocoder, address, self.config.geocode_timeout()).await
    }

    /// Strategy resolving through place search, optionally within `city`.
    pub fn by_place_search<'a>(
        &'a self,
        city: Option<&'a str>,
    ) -> PlaceSearchStrategy<'a, P, G> {
        PlaceSearchStrategy {
            gateway: self,
            city,
        }
    }

    /// Strategy resolving through the geocoder.
    pub fn by_geocoder(&self) -> GeocoderStrategy<'_, P, G> {
        GeocoderStrategy { gateway: self }
    }
}

/// [`Resolver`] backed by [`GeocodingGateway::resolve_place`].
pub struct PlaceSearchStrategy<'a, P, G> {
    gateway: &'a GeocodingGateway<P, G>,
    city: Option<&'a str>,
}

impl<P, G> Resolver for PlaceSearchStrategy<'_, P, G>
where
    P: PlaceSearch,
    G: Geocoder,
{
    async fn resolve(&self, name: &str) -> GeocodingResult {
        self.gateway.resolve_place(name, self.city).await
    }
}

/// [`Resolver`] backed by [`GeocodingGateway::geocode_address`].
pub struct GeocoderStrategy<'a, P, G> {
    gateway: &'a GeocodingGateway<P, G>,
}

impl<P, G> Resolver for GeocoderStrategy<'_, P, G>
where
    P: PlaceSearch,
    G: Geocoder,
{
    async fn resolve(&self, name: &str) -> GeocodingResult {
        self.gateway.geocode_address(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{LngLat, Location};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records queries and answers with a fixed location.
    #[derive(Default)]
    struct RecordingSearch {
        queries: Mutex<Vec<(String, Option<String>)>>,
    }

    impl PlaceSearch for RecordingSearch {
        async fn search(&self, keyword: &str, city: Option<&str>) -> GeocodingResult {
            self.queries
                .lock()
                .unwrap()
                .push((keyword.to_string(), city.map(str::to_string)));
            GeocodingResult::success(Location::new(keyword, LngLat::new(1.0, 2.0).unwrap()))
        }
    }

    struct NeverGeocoder;

    impl Geocoder for NeverGeocoder {
        fn get_location(&self, _address: &str, callback: GeocodeCallback) {
            std::mem::forget(callback);
        }
    }

    fn gateway(config: GatewayConfig) -> GeocodingGateway<RecordingSearch, NeverGeocoder> {
        GeocodingGateway::new(RecordingSearch::default(), NeverGeocoder, config)
    }

    #[tokio::test]
    async fn test_blank_keyword_short_circuits() {
        let gateway = gateway(GatewayConfig::default());
        let result = gateway.resolve_place("   ", None).await;

        assert_eq!(result.reason(), Some("empty place name"));
        assert!(gateway.place_search.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_default_city_applies_when_not_given() {
        let gateway = gateway(GatewayConfig::new().with_default_city("杭州"));

        gateway.resolve_place("西湖", None).await;
        gateway.resolve_place("外滩", Some("上海")).await;

        let queries = gateway.place_search.queries.lock().unwrap();
        assert_eq!(queries[0], ("西湖".to_string(), Some("杭州".to_string())));
        assert_eq!(queries[1], ("外滩".to_string(), Some("上海".to_string())));
    }

    #[tokio::test]
    async fn test_geocode_address_uses_configured_timeout() {
        let gateway =
            gateway(GatewayConfig::new().with_geocode_timeout(Duration::from_millis(20)));

        let result = gateway.geocode_address("somewhere").await;
        assert!(result.is_timeout());
    }

    #[tokio::test]
    async fn test_strategies_delegate() {
        let gateway =
            gateway(GatewayConfig::new().with_geocode_timeout(Duration::from_millis(10)));

        let by_search = gateway.by_place_search(Some("北京"));
        assert!(by_search.resolve("故宫").await.is_success());

        let by_geocoder = gateway.by_geocoder();
        assert!(by_geocoder.resolve("故宫").await.is_timeout());
    }
}
