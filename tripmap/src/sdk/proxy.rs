//! Reverse geocoding and route planning through the backend map proxy.

use serde_json::Value;
use tracing::{debug, warn};

use crate::coord::{join_points, LngLat};
use crate::gateway::{describe_status, RegeoResponse, STATUS_OK};
use crate::overlay::{RawRoute, ReverseGeocoder, RouteFailure, RoutePlanner, RouteRequest};
use crate::provider::{AsyncHttpClient, ProviderError, ProxyEndpoints};

/// Reverse geocoder over `GET /api/map/regeo`.
#[derive(Clone)]
pub struct ProxyReverseGeocoder<C> {
    client: C,
    endpoints: ProxyEndpoints,
}

impl<C: AsyncHttpClient> ProxyReverseGeocoder<C> {
    pub fn new(client: C, endpoints: ProxyEndpoints) -> Self {
        Self { client, endpoints }
    }
}

impl<C: AsyncHttpClient> ReverseGeocoder for ProxyReverseGeocoder<C> {
    async fn reverse(&self, position: LngLat, radius: u32) -> Result<String, ProviderError> {
        let url = self.endpoints.regeo(&position.to_string(), radius)?;
        let body = self.client.get(url.as_str()).await?;

        let response: RegeoResponse = serde_json::from_slice(&body).map_err(|e| {
            ProviderError::InvalidResponse(format!("malformed regeo response: {}", e))
        })?;

        if response.status.as_deref() != Some(STATUS_OK) {
            return Err(ProviderError::ProviderSpecific(describe_status(
                &response.status,
                &response.info,
            )));
        }

        response
            .regeocode
            .and_then(|r| r.formatted_address)
            .ok_or_else(|| {
                ProviderError::ProviderSpecific(format!("no address near {}", position))
            })
    }
}

/// Driving route planner over `GET /api/map/driving`.
///
/// A provider status of `"1"` resolves with the raw body; anything else,
/// including transport errors, rejects with a raw JSON payload.
#[derive(Clone)]
pub struct ProxyRoutePlanner<C> {
    client: C,
    endpoints: ProxyEndpoints,
}

impl<C: AsyncHttpClient> ProxyRoutePlanner<C> {
    pub fn new(client: C, endpoints: ProxyEndpoints) -> Self {
        Self { client, endpoints }
    }
}

impl<C: AsyncHttpClient> RoutePlanner for ProxyRoutePlanner<C> {
    async fn plan(&self, request: &RouteRequest) -> Result<RawRoute, RouteFailure> {
        let url = self
            .endpoints
            .driving(
                &request.origin.to_string(),
                &request.destination.to_string(),
                &join_points(&request.waypoints),
                request.policy.strategy(),
            )
            .map_err(error_payload)?;

        let body = self.client.get(url.as_str()).await.map_err(|e| {
            warn!(error = %e, "Driving route request failed");
            error_payload(e)
        })?;

        let raw: Value = serde_json::from_slice(&body).map_err(|e| {
            RouteFailure(Value::String(format!("malformed driving response: {}", e)))
        })?;

        if raw.get("status").and_then(Value::as_str) == Some(STATUS_OK) {
            debug!(
                waypoints = request.waypoints.len(),
                policy = %request.policy,
                "Driving route planned"
            );
            Ok(RawRoute(raw))
        } else {
            warn!(info = ?raw.get("info"), "Driving route rejected by provider");
            Err(RouteFailure(raw))
        }
    }
}

fn error_payload(error: ProviderError) -> RouteFailure {
    RouteFailure(serde_json::json!({ "error": error.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::DrivingPolicy;
    use crate::provider::MockAsyncHttpClient;
    use serde_json::json;

    fn point(lng: f64, lat: f64) -> LngLat {
        LngLat::new(lng, lat).unwrap()
    }

    #[tokio::test]
    async fn test_reverse_success() {
        let client = MockAsyncHttpClient::json(
            r#"{"status":"1","regeocode":{"formatted_address":"北京市东城区东华门街道故宫"}}"#,
        );
        let reverse = ProxyReverseGeocoder::new(client.clone(), ProxyEndpoints::default());

        let address = reverse.reverse(point(116.397, 39.918), 1000).await.unwrap();
        assert_eq!(address, "北京市东城区东华门街道故宫");

        let url = &client.requests()[0].url;
        assert!(url.contains("/api/map/regeo?location=116.397%2C39.918&radius=1000"));
    }

    #[tokio::test]
    async fn test_reverse_empty_address_is_error() {
        let client = MockAsyncHttpClient::json(
            r#"{"status":"1","regeocode":{"formatted_address":[]}}"#,
        );
        let reverse = ProxyReverseGeocoder::new(client, ProxyEndpoints::default());
        assert!(reverse.reverse(point(0.0, 0.0), 1000).await.is_err());
    }

    #[tokio::test]
    async fn test_reverse_bad_status_is_error() {
        let client = MockAsyncHttpClient::json(r#"{"status":"0","info":"INVALID_USER_KEY"}"#);
        let reverse = ProxyReverseGeocoder::new(client, ProxyEndpoints::default());

        let err = reverse.reverse(point(1.0, 1.0), 500).await.unwrap_err();
        assert!(err.to_string().contains("INVALID_USER_KEY"));
    }

    fn request() -> RouteRequest {
        RouteRequest {
            origin: point(120.1, 30.2),
            destination: point(120.4, 30.5),
            waypoints: vec![point(120.2, 30.3)],
            policy: DrivingPolicy::LeastTime,
        }
    }

    #[tokio::test]
    async fn test_plan_success_passes_raw_through() {
        let body = r#"{"status":"1","route":{"paths":[{"distance":"1200"}]}}"#;
        let client = MockAsyncHttpClient::json(body);
        let planner = ProxyRoutePlanner::new(client.clone(), ProxyEndpoints::default());

        let raw = planner.plan(&request()).await.unwrap();
        assert_eq!(raw.0["route"]["paths"][0]["distance"], "1200");

        let url = &client.requests()[0].url;
        assert!(url.contains("strategy=0"));
        assert!(url.contains("waypoints=120.2%2C30.3"));
    }

    #[tokio::test]
    async fn test_plan_rejection_carries_raw_payload() {
        let client = MockAsyncHttpClient::json(r#"{"status":"0","info":"OVER_DIRECTION_RANGE"}"#);
        let planner = ProxyRoutePlanner::new(client, ProxyEndpoints::default());

        let failure = planner.plan(&request()).await.unwrap_err();
        assert_eq!(failure.0, json!({"status":"0","info":"OVER_DIRECTION_RANGE"}));
    }

    #[tokio::test]
    async fn test_plan_transport_error_rejects() {
        let client = MockAsyncHttpClient::new(Err(ProviderError::Unauthorized));
        let planner = ProxyRoutePlanner::new(client, ProxyEndpoints::default());

        let failure = planner.plan(&request()).await.unwrap_err();
        assert!(failure.0["error"].as_str().unwrap().contains("nauthorized"));
    }
}
