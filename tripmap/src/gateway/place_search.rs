//! Place search: the preferred resolution path for named points of interest.

use std::future::Future;

use tracing::{debug, warn};

use super::result::GeocodingResult;
use super::wire::{describe_status, SearchResponse, STATUS_OK};
use crate::coord::{LngLat, Location};
use crate::provider::{AsyncHttpClient, ProxyEndpoints};

/// Keyword search over the provider's point-of-interest index.
pub trait PlaceSearch: Send + Sync {
    /// Resolves `keyword` (optionally restricted to `city`) to the best POI.
    ///
    /// Never fails with an error: every failure is a
    /// [`GeocodingResult::Failure`].
    fn search(
        &self,
        keyword: &str,
        city: Option<&str>,
    ) -> impl Future<Output = GeocodingResult> + Send;
}

/// Place search through the backend's `/api/map/search` proxy.
#[derive(Clone)]
pub struct ProxyPlaceSearch<C> {
    client: C,
    endpoints: ProxyEndpoints,
}

impl<C: AsyncHttpClient> ProxyPlaceSearch<C> {
    pub fn new(client: C, endpoints: ProxyEndpoints) -> Self {
        Self { client, endpoints }
    }
}

impl<C: AsyncHttpClient> PlaceSearch for ProxyPlaceSearch<C> {
    async fn search(&self, keyword: &str, city: Option<&str>) -> GeocodingResult {
        let url = match self.endpoints.search(keyword, city) {
            Ok(url) => url,
            Err(e) => return GeocodingResult::failure(e.to_string()),
        };

        let body = match self.client.get(url.as_str()).await {
            Ok(body) => body,
            Err(e) => {
                warn!(keyword, error = %e, "Place search request failed");
                return GeocodingResult::failure(format!("place search failed: {}", e));
            }
        };

        parse_search_response(keyword, &body)
    }
}

/// Interprets a place-search body, taking the first POI.
pub(crate) fn parse_search_response(keyword: &str, body: &[u8]) -> GeocodingResult {
    let response: SearchResponse = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => {
            warn!(keyword, error = %e, "Malformed place search response");
            return GeocodingResult::failure(format!("malformed place search response: {}", e));
        }
    };

    if response.status.as_deref() != Some(STATUS_OK) {
        return GeocodingResult::failure(format!(
            "place search for '{}' returned {}",
            keyword,
            describe_status(&response.status, &response.info)
        ));
    }

    let Some(poi) = response.pois.first() else {
        debug!(keyword, "Place search returned no POIs");
        return GeocodingResult::failure(format!("no place found for '{}'", keyword));
    };

    let position = match poi.location.as_deref().map(str::parse::<LngLat>) {
        Some(Ok(p)) => p,
        Some(Err(e)) => return GeocodingResult::failure(e.to_string()),
        None => {
            return GeocodingResult::failure(format!("place '{}' has no location", keyword));
        }
    };

    let name = poi.name.clone().unwrap_or_else(|| keyword.to_string());
    debug!(keyword, name = %name, %position, "Place resolved");

    GeocodingResult::success(Location::with_address(
        name,
        poi.composed_address(),
        position,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockAsyncHttpClient, ProviderError};

    const WEST_LAKE: &str = r#"{
        "status": "1",
        "count": "1",
        "info": "OK",
        "pois": [{
            "name": "西湖风景名胜区",
            "location": "120.141375,30.256668",
            "address": "龙井路1号",
            "pname": "浙江省",
            "cityname": "杭州市",
            "adname": "西湖区"
        }]
    }"#;

    fn search_with(body: &str) -> ProxyPlaceSearch<MockAsyncHttpClient> {
        ProxyPlaceSearch::new(MockAsyncHttpClient::json(body), ProxyEndpoints::default())
    }

    #[tokio::test]
    async fn test_first_poi_wins() {
        let search = search_with(WEST_LAKE);
        let result = search.search("西湖", Some("杭州")).await;

        let location = result.location().expect("should resolve");
        assert_eq!(location.name(), "西湖风景名胜区");
        assert_eq!(location.address(), Some("龙井路1号"));
        assert_eq!(location.lng(), 120.141375);
        assert_eq!(location.lat(), 30.256668);
    }

    #[tokio::test]
    async fn test_sends_keyword_and_city() {
        let client = MockAsyncHttpClient::json(WEST_LAKE);
        let search = ProxyPlaceSearch::new(client.clone(), ProxyEndpoints::default());
        search.search("西湖", Some("杭州")).await;

        let url = &client.requests()[0].url;
        assert!(url.contains("/api/map/search?keywords="));
        assert!(url.contains("&city="));
    }

    #[tokio::test]
    async fn test_zero_pois_is_failure() {
        let search = search_with(r#"{"status":"1","count":"0","pois":[]}"#);
        let result = search.search("Atlantis", None).await;
        assert!(!result.is_success());
        assert!(result.reason().unwrap().contains("Atlantis"));
    }

    #[tokio::test]
    async fn test_bad_status_is_failure() {
        let search = search_with(r#"{"status":"0","info":"DAILY_QUERY_OVER_LIMIT"}"#);
        let result = search.search("西湖", None).await;
        assert!(result.reason().unwrap().contains("DAILY_QUERY_OVER_LIMIT"));
    }

    #[tokio::test]
    async fn test_network_error_is_failure() {
        let client = MockAsyncHttpClient::new(Err(ProviderError::HttpError("refused".into())));
        let search = ProxyPlaceSearch::new(client, ProxyEndpoints::default());
        let result = search.search("西湖", None).await;
        assert!(result.reason().unwrap().contains("refused"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_failure() {
        let search = search_with("<html>502 Bad Gateway</html>");
        let result = search.search("西湖", None).await;
        assert!(result.reason().unwrap().contains("malformed"));
    }

    #[test]
    fn test_bad_location_is_failure() {
        let body = br#"{"status":"1","pois":[{"name":"X","location":"oops"}]}"#;
        let result = parse_search_response("X", body);
        assert!(!result.is_success());
    }

    #[test]
    fn test_missing_name_falls_back_to_keyword() {
        let body = br#"{"status":"1","pois":[{"location":"1.5,2.5","cityname":"Paris"}]}"#;
        let location = parse_search_response("Louvre", body).into_location().unwrap();
        assert_eq!(location.name(), "Louvre");
        assert_eq!(location.address(), Some("Paris"));
    }
}
