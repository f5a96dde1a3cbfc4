//! Provider error types

use std::fmt;

/// Errors that can occur while talking to the map provider or its proxy.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// HTTP request failed
    HttpError(String),
    /// The proxy rejected the bearer token (HTTP 401)
    Unauthorized,
    /// Invalid response data from provider
    InvalidResponse(String),
    /// Provider-specific error (non-OK status carried in a well-formed body)
    ProviderSpecific(String),
    /// The host map SDK is not available
    SdkUnavailable(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::Unauthorized => write!(f, "Unauthorized: session token rejected"),
            ProviderError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ProviderError::ProviderSpecific(msg) => write!(f, "Provider error: {}", msg),
            ProviderError::SdkUnavailable(msg) => write!(f, "Map SDK unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ProviderError::HttpError("boom".to_string()).to_string(),
            "HTTP error: boom"
        );
        assert_eq!(
            ProviderError::ProviderSpecific("INVALID_USER_KEY".to_string()).to_string(),
            "Provider error: INVALID_USER_KEY"
        );
        assert!(ProviderError::Unauthorized.to_string().contains("Unauthorized"));
    }
}
