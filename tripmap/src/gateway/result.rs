//! Resolution outcome type.

use crate::coord::Location;

/// Reason reported when the geocoder never answers.
pub const TIMEOUT_REASON: &str = "timeout";

/// Outcome of resolving one place.
///
/// Every resolution operation returns this instead of an error so batch and
/// UI callers can aggregate outcomes without per-call error handling.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodingResult {
    Success { location: Location },
    Failure { reason: String },
}

impl GeocodingResult {
    pub fn success(location: Location) -> Self {
        Self::Success { location }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn timeout() -> Self {
        Self::failure(TIMEOUT_REASON)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Failure { reason } if reason == TIMEOUT_REASON)
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::Success { location } => Some(location),
            Self::Failure { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason } => Some(reason),
        }
    }

    pub fn into_location(self) -> Option<Location> {
        match self {
            Self::Success { location } => Some(location),
            Self::Failure { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::LngLat;

    #[test]
    fn test_success_accessors() {
        let loc = Location::new("Bund", LngLat::new(121.49, 31.24).unwrap());
        let result = GeocodingResult::success(loc.clone());

        assert!(result.is_success());
        assert_eq!(result.location(), Some(&loc));
        assert!(result.reason().is_none());
        assert_eq!(result.into_location(), Some(loc));
    }

    #[test]
    fn test_timeout_is_failure() {
        let result = GeocodingResult::timeout();
        assert!(!result.is_success());
        assert!(result.is_timeout());
        assert_eq!(result.reason(), Some("timeout"));
        assert!(result.location().is_none());
    }
}
