//! Callback-style geocoder and its timeout guard.
//!
//! Host map SDKs expose geocoding as "call me back when done", and some never
//! call back at all (script blocked, quota exhausted). [`geocode_with_timeout`]
//! turns that into a single settled [`GeocodingResult`] by racing the callback
//! against a timer on a oneshot channel: whichever settles first wins, and a
//! callback that fires after the deadline sends into a closed channel.

use std::fmt;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::result::GeocodingResult;
use super::wire::{describe_status, GeocodeResponse, STATUS_OK};
use crate::coord::{LngLat, Location};
use crate::provider::{AsyncHttpClient, ProxyEndpoints};

/// Default bound on how long to wait for the geocoder callback.
pub const DEFAULT_GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);

/// Status reported to a geocoder callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeStatus {
    /// The lookup finished; results may still be empty
    Complete,
    /// The provider found nothing
    NoData,
    /// The lookup failed
    Error(String),
}

impl fmt::Display for GeocodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeStatus::Complete => write!(f, "complete"),
            GeocodeStatus::NoData => write!(f, "no_data"),
            GeocodeStatus::Error(msg) => write!(f, "error: {}", msg),
        }
    }
}

/// One geocoder candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeCandidate {
    pub formatted_address: Option<String>,
    pub position: LngLat,
}

/// Payload delivered to a geocoder callback.
pub type GeocodeReply = Vec<GeocodeCandidate>;

/// Callback invoked at most once by a [`Geocoder`].
pub type GeocodeCallback = Box<dyn FnOnce(GeocodeStatus, GeocodeReply) + Send + 'static>;

/// Client-side geocoder with callback completion.
///
/// Implementations may invoke the callback synchronously, later from another
/// task, or never.
pub trait Geocoder: Send + Sync {
    fn get_location(&self, address: &str, callback: GeocodeCallback);
}

/// Geocodes `address`, settling to `Failure{"timeout"}` if the callback does
/// not fire within `timeout`.
pub async fn geocode_with_timeout<G>(
    geocoder: &G,
    address: &str,
    timeout: Duration,
) -> GeocodingResult
where
    G: Geocoder + ?Sized,
{
    let (tx, rx) = oneshot::channel();

    geocoder.get_location(
        address,
        Box::new(move |status, reply| {
            // The receiver is gone once the deadline has passed
            let _ = tx.send((status, reply));
        }),
    );

    match tokio::time::timeout(timeout, rx).await {
        Ok(Ok((status, reply))) => interpret(address, status, reply),
        Ok(Err(_)) => {
            warn!(address, "Geocoder dropped its callback without answering");
            GeocodingResult::failure(format!("geocoder gave no answer for '{}'", address))
        }
        Err(_) => {
            warn!(
                address,
                timeout_ms = timeout.as_millis() as u64,
                "Geocoder timed out"
            );
            GeocodingResult::timeout()
        }
    }
}

fn interpret(address: &str, status: GeocodeStatus, reply: GeocodeReply) -> GeocodingResult {
    match (status, reply.into_iter().next()) {
        (GeocodeStatus::Complete, Some(first)) => {
            debug!(address, position = %first.position, "Address geocoded");
            GeocodingResult::success(Location::with_address(
                address,
                first.formatted_address,
                first.position,
            ))
        }
        (status, _) => GeocodingResult::failure(format!(
            "unable to locate '{}' (geocoder status: {})",
            address, status
        )),
    }
}

/// Geocoder backed by the `/api/map/geocode` proxy.
///
/// Each lookup runs on a spawned tokio task that invokes the callback when the
/// request settles.
#[derive(Clone)]
pub struct ProxyGeocoder<C> {
    client: C,
    endpoints: ProxyEndpoints,
}

impl<C> ProxyGeocoder<C>
where
    C: AsyncHttpClient + Clone + 'static,
{
    pub fn new(client: C, endpoints: ProxyEndpoints) -> Self {
        Self { client, endpoints }
    }

    async fn lookup(client: C, url: String) -> (GeocodeStatus, GeocodeReply) {
        let body = match client.get(&url).await {
            Ok(body) => body,
            Err(e) => return (GeocodeStatus::Error(e.to_string()), Vec::new()),
        };

        let response: GeocodeResponse = match serde_json::from_slice(&body) {
            Ok(r) => r,
            Err(e) => {
                return (
                    GeocodeStatus::Error(format!("malformed geocode response: {}", e)),
                    Vec::new(),
                )
            }
        };

        if response.status.as_deref() != Some(STATUS_OK) {
            return (
                GeocodeStatus::Error(describe_status(&response.status, &response.info)),
                Vec::new(),
            );
        }

        let candidates: GeocodeReply = response
            .geocodes
            .into_iter()
            .filter_map(|g| {
                let position = g.location.as_deref()?.parse::<LngLat>().ok()?;
                Some(GeocodeCandidate {
                    formatted_address: g.formatted_address,
                    position,
                })
            })
            .collect();

        if candidates.is_empty() {
            (GeocodeStatus::NoData, candidates)
        } else {
            (GeocodeStatus::Complete, candidates)
        }
    }
}

impl<C> Geocoder for ProxyGeocoder<C>
where
    C: AsyncHttpClient + Clone + 'static,
{
    fn get_location(&self, address: &str, callback: GeocodeCallback) {
        let url = match self.endpoints.geocode(address) {
            Ok(url) => url.to_string(),
            Err(e) => {
                callback(GeocodeStatus::Error(e.to_string()), Vec::new());
                return;
            }
        };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            callback(
                GeocodeStatus::Error("no async runtime available".to_string()),
                Vec::new(),
            );
            return;
        };

        let client = self.client.clone();
        handle.spawn(async move {
            let (status, reply) = Self::lookup(client, url).await;
            callback(status, reply);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockAsyncHttpClient, ProviderError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Answers synchronously with a fixed status and reply.
    struct ImmediateGeocoder {
        status: GeocodeStatus,
        reply: GeocodeReply,
    }

    impl Geocoder for ImmediateGeocoder {
        fn get_location(&self, _address: &str, callback: GeocodeCallback) {
            callback(self.status.clone(), self.reply.clone());
        }
    }

    /// Keeps the callback and never calls it unless told to.
    #[derive(Default)]
    struct SilentGeocoder {
        parked: Mutex<Option<GeocodeCallback>>,
    }

    impl Geocoder for SilentGeocoder {
        fn get_location(&self, _address: &str, callback: GeocodeCallback) {
            *self.parked.lock().unwrap() = Some(callback);
        }
    }

    /// Answers from a spawned task after a delay.
    struct LateGeocoder {
        delay: Duration,
        fired: Arc<AtomicUsize>,
    }

    impl Geocoder for LateGeocoder {
        fn get_location(&self, _address: &str, callback: GeocodeCallback) {
            let delay = self.delay;
            let fired = Arc::clone(&self.fired);
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                fired.fetch_add(1, Ordering::SeqCst);
                callback(
                    GeocodeStatus::Complete,
                    vec![GeocodeCandidate {
                        formatted_address: Some("late".into()),
                        position: LngLat::new(1.0, 1.0).unwrap(),
                    }],
                );
            });
        }
    }

    struct DroppingGeocoder;

    impl Geocoder for DroppingGeocoder {
        fn get_location(&self, _address: &str, callback: GeocodeCallback) {
            drop(callback);
        }
    }

    fn candidate(address: &str, lng: f64, lat: f64) -> GeocodeCandidate {
        GeocodeCandidate {
            formatted_address: Some(address.to_string()),
            position: LngLat::new(lng, lat).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_complete_takes_first_candidate() {
        let geocoder = ImmediateGeocoder {
            status: GeocodeStatus::Complete,
            reply: vec![
                candidate("北京市东城区天安门", 116.397428, 39.90923),
                candidate("other", 0.0, 0.0),
            ],
        };

        let result = geocode_with_timeout(&geocoder, "天安门", DEFAULT_GEOCODE_TIMEOUT).await;
        let location = result.location().unwrap();
        assert_eq!(location.name(), "天安门");
        assert_eq!(location.address(), Some("北京市东城区天安门"));
        assert_eq!(location.lng(), 116.397428);
    }

    #[tokio::test]
    async fn test_complete_without_candidates_fails() {
        let geocoder = ImmediateGeocoder {
            status: GeocodeStatus::Complete,
            reply: vec![],
        };
        let result = geocode_with_timeout(&geocoder, "nowhere", DEFAULT_GEOCODE_TIMEOUT).await;
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn test_status_embedded_in_reason() {
        let geocoder = ImmediateGeocoder {
            status: GeocodeStatus::NoData,
            reply: vec![],
        };
        let result = geocode_with_timeout(&geocoder, "nowhere", DEFAULT_GEOCODE_TIMEOUT).await;
        assert!(result.reason().unwrap().contains("no_data"));
    }

    #[tokio::test]
    async fn test_silent_geocoder_times_out() {
        let geocoder = SilentGeocoder::default();
        let result = geocode_with_timeout(&geocoder, "x", Duration::from_millis(30)).await;
        assert!(result.is_timeout());

        // Firing the parked callback after the deadline must be harmless
        let callback = geocoder.parked.lock().unwrap().take().unwrap();
        callback(GeocodeStatus::Complete, vec![candidate("late", 1.0, 1.0)]);
    }

    #[tokio::test]
    async fn test_late_callback_is_ignored() {
        let fired = Arc::new(AtomicUsize::new(0));
        let geocoder = LateGeocoder {
            delay: Duration::from_millis(80),
            fired: Arc::clone(&fired),
        };

        let result = geocode_with_timeout(&geocoder, "x", Duration::from_millis(20)).await;
        assert!(result.is_timeout());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1, "callback did fire late");
    }

    #[tokio::test]
    async fn test_dropped_callback_is_failure_not_timeout() {
        let result =
            geocode_with_timeout(&DroppingGeocoder, "x", Duration::from_secs(5)).await;
        assert!(!result.is_success());
        assert!(!result.is_timeout());
    }

    #[tokio::test]
    async fn test_proxy_geocoder_success() {
        let client = MockAsyncHttpClient::json(
            r#"{"status":"1","info":"OK","geocodes":[
                {"formatted_address":"浙江省杭州市西湖区","location":"120.130203,30.259324"}
            ]}"#,
        );
        let geocoder = ProxyGeocoder::new(client.clone(), ProxyEndpoints::default());

        let result = geocode_with_timeout(&geocoder, "西湖区", DEFAULT_GEOCODE_TIMEOUT).await;
        let location = result.location().unwrap();
        assert_eq!(location.address(), Some("浙江省杭州市西湖区"));
        assert!(client.requests()[0].url.contains("/api/map/geocode?address="));
    }

    #[tokio::test]
    async fn test_proxy_geocoder_empty_is_no_data() {
        let client = MockAsyncHttpClient::json(r#"{"status":"1","count":"0","geocodes":[]}"#);
        let geocoder = ProxyGeocoder::new(client, ProxyEndpoints::default());

        let result = geocode_with_timeout(&geocoder, "???", DEFAULT_GEOCODE_TIMEOUT).await;
        assert!(result.reason().unwrap().contains("no_data"));
    }

    #[tokio::test]
    async fn test_proxy_geocoder_http_error() {
        let client = MockAsyncHttpClient::new(Err(ProviderError::HttpError("HTTP 500".into())));
        let geocoder = ProxyGeocoder::new(client, ProxyEndpoints::default());

        let result = geocode_with_timeout(&geocoder, "x", DEFAULT_GEOCODE_TIMEOUT).await;
        assert!(result.reason().unwrap().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_proxy_geocoder_slow_proxy_times_out() {
        let client = MockAsyncHttpClient::json(r#"{"status":"1","geocodes":[]}"#)
            .with_delay(Duration::from_millis(200));
        let geocoder = ProxyGeocoder::new(client, ProxyEndpoints::default());

        let result = geocode_with_timeout(&geocoder, "x", Duration::from_millis(20)).await;
        assert!(result.is_timeout());
    }

    #[test]
    fn test_proxy_geocoder_without_runtime_reports_error() {
        let client = MockAsyncHttpClient::json("{}");
        let geocoder = ProxyGeocoder::new(client, ProxyEndpoints::default());
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);

        geocoder.get_location(
            "x",
            Box::new(move |status, _| {
                *sink.lock().unwrap() = Some(status);
            }),
        );

        assert!(matches!(
            seen.lock().unwrap().as_ref(),
            Some(GeocodeStatus::Error(_))
        ));
    }
}
