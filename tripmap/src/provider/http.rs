//! HTTP client abstraction for testability

use super::types::ProviderError;
use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Default timeout for proxy requests, matching the web client's 60 s budget.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Trait for asynchronous HTTP client operations.
///
/// Allows dependency injection of mock clients in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;

    /// Performs an async HTTP GET request with Bearer token authentication.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    /// * `bearer_token` - The bearer token for Authorization header
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error. A 401 status maps to
    /// [`ProviderError::Unauthorized`].
    fn get_with_bearer(
        &self,
        url: &str,
        bearer_token: &str,
    ) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;
}

/// Async HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a new client with the default timeout.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT_SECS)
    }

    /// Creates a new client with a custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("tripmap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ProviderError::HttpError(format!("Failed to create async HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<Vec<u8>, ProviderError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match request.send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(ProviderError::HttpError(format!("Request failed: {}", e)));
            }
        };

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(url = url, "HTTP 401 from proxy");
            return Err(ProviderError::Unauthorized);
        }

        if !response.status().is_success() {
            warn!(
                url = url,
                status = response.status().as_u16(),
                "HTTP error status"
            );
            return Err(ProviderError::HttpError(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| ProviderError::HttpError(format!("Failed to read response: {}", e)))
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        self.execute(self.client.get(url), url).await
    }

    async fn get_with_bearer(
        &self,
        url: &str,
        bearer_token: &str,
    ) -> Result<Vec<u8>, ProviderError> {
        let request = self.client.get(url).bearer_auth(bearer_token);
        self.execute(request, url).await
    }
}
