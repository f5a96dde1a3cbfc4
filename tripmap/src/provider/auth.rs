//! Session credentials for proxy requests.
//!
//! Authentication itself belongs to an external identity provider. The map
//! layer only needs two things from it: the current bearer token, and a way to
//! report that the proxy rejected that token.

use super::http::AsyncHttpClient;
use super::types::ProviderError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Source of the caller's session token.
pub trait Credentials: Send + Sync {
    /// Returns the current bearer token, or `None` for anonymous requests.
    fn bearer_token(&self) -> Option<String>;

    /// Called when the proxy answers HTTP 401.
    ///
    /// Implementations typically sign the user out.
    fn notify_unauthorized(&self);
}

/// Credentials that never carry a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl Credentials for Anonymous {
    fn bearer_token(&self) -> Option<String> {
        None
    }

    fn notify_unauthorized(&self) {}
}

/// A fixed token, e.g. from the configuration file.
///
/// After a 401 the token is considered revoked and no longer sent.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: String,
    revoked: Arc<AtomicBool>,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            revoked: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether the proxy has rejected this token.
    pub fn is_revoked(&self) -> bool {
        self.revoked.load(Ordering::Acquire)
    }
}

impl Credentials for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        if self.is_revoked() {
            None
        } else {
            Some(self.token.clone())
        }
    }

    fn notify_unauthorized(&self) {
        self.revoked.store(true, Ordering::Release);
    }
}

/// HTTP client wrapper that attaches the session token to every request
/// and reports 401 responses back to the credentials source.
#[derive(Clone)]
pub struct AuthorizedClient<C, A> {
    inner: C,
    credentials: A,
}

impl<C, A> AuthorizedClient<C, A>
where
    C: AsyncHttpClient,
    A: Credentials,
{
    pub fn new(inner: C, credentials: A) -> Self {
        Self { inner, credentials }
    }

    fn observe(&self, result: Result<Vec<u8>, ProviderError>) -> Result<Vec<u8>, ProviderError> {
        if matches!(result, Err(ProviderError::Unauthorized)) {
            warn!("Proxy rejected session token, notifying credentials source");
            self.credentials.notify_unauthorized();
        }
        result
    }
}

impl<C, A> AsyncHttpClient for AuthorizedClient<C, A>
where
    C: AsyncHttpClient,
    A: Credentials,
{
    async fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let result = match self.credentials.bearer_token() {
            Some(token) => self.inner.get_with_bearer(url, &token).await,
            None => self.inner.get(url).await,
        };
        self.observe(result)
    }

    async fn get_with_bearer(
        &self,
        url: &str,
        bearer_token: &str,
    ) -> Result<Vec<u8>, ProviderError> {
        let result = self.inner.get_with_bearer(url, bearer_token).await;
        self.observe(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAsyncHttpClient;

    #[tokio::test]
    async fn test_attaches_token_when_present() {
        let mock = MockAsyncHttpClient::json("{}");
        let client = AuthorizedClient::new(mock.clone(), StaticToken::new("jwt"));

        client.get("http://proxy/api/map/search").await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].bearer_token.as_deref(), Some("jwt"));
    }

    #[tokio::test]
    async fn test_anonymous_sends_no_token() {
        let mock = MockAsyncHttpClient::json("{}");
        let client = AuthorizedClient::new(mock.clone(), Anonymous);

        client.get("http://proxy/api/map/search").await.unwrap();

        assert!(mock.requests()[0].bearer_token.is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_revokes_token() {
        let mock = MockAsyncHttpClient::new(Err(ProviderError::Unauthorized));
        let token = StaticToken::new("expired");
        let client = AuthorizedClient::new(mock.clone(), token.clone());

        let result = client.get("http://proxy/api/map/geocode").await;
        assert_eq!(result, Err(ProviderError::Unauthorized));
        assert!(token.is_revoked());

        // Subsequent requests go out without the rejected token
        let _ = client.get("http://proxy/api/map/geocode").await;
        assert!(mock.requests()[1].bearer_token.is_none());
    }

    #[tokio::test]
    async fn test_other_errors_keep_token() {
        let mock = MockAsyncHttpClient::new(Err(ProviderError::HttpError("503".into())));
        let token = StaticToken::new("jwt");
        let client = AuthorizedClient::new(mock, token.clone());

        let _ = client.get("http://proxy/api/map/geocode").await;
        assert!(!token.is_revoked());
    }
}
