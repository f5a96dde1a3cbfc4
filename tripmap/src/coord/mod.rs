//! Coordinate module
//!
//! Provides the place and coordinate types shared by resolution and rendering,
//! plus the `"lng,lat"` string codec used by the map provider's web services.

mod types;

pub use types::{Bounds, CoordError, LngLat, Location};

/// Encodes a sequence of points the way the provider expects waypoint lists:
/// `"lng,lat;lng,lat"`.
pub fn join_points(points: &[LngLat]) -> String {
    points
        .iter()
        .map(LngLat::to_string)
        .collect::<Vec<_>>()
        .join(";")
}
