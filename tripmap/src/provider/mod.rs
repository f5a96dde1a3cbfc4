//! Map provider plumbing
//!
//! HTTP access to the backend's map proxy endpoints, the error type shared by
//! every provider-facing call, and session credentials.
//!
//! ```ignore
//! use tripmap::provider::{AsyncReqwestClient, AuthorizedClient, StaticToken};
//!
//! let http = AsyncReqwestClient::new()?;
//! let client = AuthorizedClient::new(http, StaticToken::new(token));
//! ```

mod auth;
mod endpoints;
mod http;
mod types;

pub use auth::{Anonymous, AuthorizedClient, Credentials, StaticToken};
pub use endpoints::{
    ProxyEndpoints, DEFAULT_BASE_URL, DRIVING_PATH, GEOCODE_PATH, REGEO_PATH, SEARCH_PATH,
};
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_HTTP_TIMEOUT_SECS};
pub use types::ProviderError;

#[cfg(test)]
pub use http::tests::{MockAsyncHttpClient, RecordedRequest};
