//! Coordinate type definitions

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when decoding provider coordinates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// The text was not a `"lng,lat"` pair
    #[error("Malformed coordinate '{0}', expected \"lng,lat\"")]
    Malformed(String),

    /// One of the components was NaN or infinite
    #[error("Coordinate ({lng}, {lat}) is not finite")]
    NotFinite { lng: f64, lat: f64 },
}

/// A longitude/latitude pair in the provider's native coordinate system.
///
/// No datum conversion is applied anywhere in this crate. The reference
/// provider reports GCJ-02 coordinates; integrating a WGS-84 provider means
/// converting before values reach a [`Location`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    /// Creates a coordinate pair, rejecting non-finite components.
    pub fn new(lng: f64, lat: f64) -> Result<Self, CoordError> {
        if !lng.is_finite() || !lat.is_finite() {
            return Err(CoordError::NotFinite { lng, lat });
        }
        Ok(Self { lng, lat })
    }
}

impl FromStr for LngLat {
    type Err = CoordError;

    /// Parses the provider's `"lng,lat"` encoding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lng, lat) = s
            .split_once(',')
            .ok_or_else(|| CoordError::Malformed(s.to_string()))?;

        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| CoordError::Malformed(s.to_string()))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| CoordError::Malformed(s.to_string()))?;

        Self::new(lng, lat)
    }
}

impl fmt::Display for LngLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lng, self.lat)
    }
}

/// A resolved place.
///
/// Produced by resolution and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    lng: f64,
    lat: f64,
}

impl Location {
    /// Creates a location without an address.
    pub fn new(name: impl Into<String>, position: LngLat) -> Self {
        Self {
            name: name.into(),
            address: None,
            lng: position.lng,
            lat: position.lat,
        }
    }

    /// Creates a location with an optional address.
    pub fn with_address(
        name: impl Into<String>,
        address: Option<String>,
        position: LngLat,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.filter(|a| !a.trim().is_empty()),
            lng: position.lng,
            lat: position.lat,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Returns the coordinate pair of this location.
    pub fn position(&self) -> LngLat {
        LngLat {
            lng: self.lng,
            lat: self.lat,
        }
    }
}

/// Axis-aligned box enclosing a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: LngLat,
    pub north_east: LngLat,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for an empty set.
    pub fn enclosing<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a LngLat>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds {
            south_west: *first,
            north_east: *first,
        };

        for p in iter {
            bounds.south_west.lng = bounds.south_west.lng.min(p.lng);
            bounds.south_west.lat = bounds.south_west.lat.min(p.lat);
            bounds.north_east.lng = bounds.north_east.lng.max(p.lng);
            bounds.north_east.lat = bounds.north_east.lat.max(p.lat);
        }

        Some(bounds)
    }

    /// Center point of the box.
    pub fn center(&self) -> LngLat {
        LngLat {
            lng: (self.south_west.lng + self.north_east.lng) / 2.0,
            lat: (self.south_west.lat + self.north_east.lat) / 2.0,
        }
    }

    /// Checks whether a point lies inside or on the edge of the box.
    pub fn contains(&self, p: &LngLat) -> bool {
        (self.south_west.lng..=self.north_east.lng).contains(&p.lng)
            && (self.south_west.lat..=self.north_east.lat).contains(&p.lat)
    }
}
