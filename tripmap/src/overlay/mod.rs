//! Map overlay manager
//!
//! A [`MapSession`] owns one map surface and everything drawn on it: markers
//! with their click bindings, polylines, the single map-click listener and
//! the interaction lock. Sessions are created with [`init_map`] from any
//! [`MapSdk`](crate::sdk::MapSdk) and are independent of each other.
//!
//! [`MapService`] is a slot for callers that keep one service object across
//! session lifetimes: every operation on an empty slot is a logged no-op.
//!
//! Surface events reach the session through [`MapSession::dispatch`]:
//!
//! | Event                | With binding                      | Without binding                     |
//! |----------------------|-----------------------------------|-------------------------------------|
//! | `MarkerClick`        | callback, propagation suppressed  | one info window, then map listener  |
//! | `MarkerRightClick`   | callback, context menu suppressed | nothing                             |
//! | `Click`              | reverse geocode, then listener    | nothing                             |

pub mod click;
pub mod interaction;
mod route;
mod service;
mod session;
mod surface;
mod types;

pub use click::{ClickCallback, ClickLocation, ReverseGeocoder};
pub use interaction::InteractionFlags;
pub use route::{DrivingPolicy, RawRoute, RouteFailure, RoutePlanner, RouteRequest};
pub use service::{MapService, NOT_INITIALIZED};
pub use session::{init_map, MapSession};
pub use surface::{EventOutcome, MapEvent, MapSurface};
pub use types::{
    InfoWindow, LineShape, MarkerCallback, MarkerHandle, MarkerIcon, MarkerId, MarkerOptions,
    MarkerRequest, PathStyle, PolylineHandle, PolylineId, PolylineOptions, DEFAULT_PATH_COLOR,
    PATH_STROKE_OPACITY, PATH_STROKE_WEIGHT,
};
