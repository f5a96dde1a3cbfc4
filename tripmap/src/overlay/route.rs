//! Driving route planning.

use std::fmt;
use std::future::Future;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::coord::LngLat;

/// Route optimization policy understood by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum DrivingPolicy {
    /// Fastest route
    #[default]
    LeastTime,
    LeastFee,
    LeastDistance,
    /// Fastest route using live traffic
    RealTraffic,
}

impl DrivingPolicy {
    /// Provider `strategy` parameter value.
    pub fn strategy(&self) -> u8 {
        match self {
            DrivingPolicy::LeastTime => 0,
            DrivingPolicy::LeastFee => 1,
            DrivingPolicy::LeastDistance => 2,
            DrivingPolicy::RealTraffic => 4,
        }
    }
}

impl fmt::Display for DrivingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DrivingPolicy::LeastTime => "least_time",
            DrivingPolicy::LeastFee => "least_fee",
            DrivingPolicy::LeastDistance => "least_distance",
            DrivingPolicy::RealTraffic => "real_traffic",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: LngLat,
    pub destination: LngLat,
    pub waypoints: Vec<LngLat>,
    pub policy: DrivingPolicy,
}

/// Provider route result, passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRoute(pub Value);

impl RawRoute {
    /// Geometry of the first path: every step polyline, concatenated.
    ///
    /// Consecutive duplicate points are collapsed. Unparsable segments are
    /// skipped. Empty when the payload has no path.
    pub fn path_points(&self) -> Vec<LngLat> {
        let steps = self
            .0
            .pointer("/route/paths/0/steps")
            .and_then(Value::as_array);

        let mut points: Vec<LngLat> = Vec::new();
        for polyline in steps
            .into_iter()
            .flatten()
            .filter_map(|step| step.get("polyline").and_then(Value::as_str))
        {
            for point in polyline.split(';').filter_map(|p| p.parse::<LngLat>().ok()) {
                if points.last() != Some(&point) {
                    points.push(point);
                }
            }
        }
        points
    }
}

/// Route planning rejection carrying the provider's raw payload.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("route planning failed: {0}")]
pub struct RouteFailure(pub Value);

impl RouteFailure {
    pub fn not_initialized() -> Self {
        RouteFailure(Value::String("map not initialized".to_string()))
    }

    pub fn is_not_initialized(&self) -> bool {
        self.0.as_str() == Some("map not initialized")
    }
}

/// Driving route service.
pub trait RoutePlanner: Send + Sync {
    fn plan(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<RawRoute, RouteFailure>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_policy_strategy_codes() {
        assert_eq!(DrivingPolicy::default(), DrivingPolicy::LeastTime);
        assert_eq!(DrivingPolicy::LeastTime.strategy(), 0);
        assert_eq!(DrivingPolicy::RealTraffic.strategy(), 4);
        assert_eq!(DrivingPolicy::LeastDistance.to_string(), "least_distance");
    }

    #[test]
    fn test_path_points_concatenates_steps() {
        let raw = RawRoute(json!({
            "status": "1",
            "route": {"paths": [{"steps": [
                {"polyline": "120.1,30.2;120.2,30.3"},
                {"polyline": "120.2,30.3;120.4,30.5"}
            ]}]}
        }));

        let points = raw.path_points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], LngLat::new(120.4, 30.5).unwrap());
    }

    #[test]
    fn test_path_points_without_route() {
        assert!(RawRoute(json!({"status": "1"})).path_points().is_empty());
        assert!(RawRoute(json!("weird")).path_points().is_empty());
    }

    #[test]
    fn test_not_initialized_failure() {
        let failure = RouteFailure::not_initialized();
        assert!(failure.is_not_initialized());
        assert_eq!(
            failure.to_string(),
            "route planning failed: \"map not initialized\""
        );
    }
}
