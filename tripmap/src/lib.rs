//! tripmap - Map overlays and geocoding for travel itineraries
//!
//! This library resolves place names from an itinerary to coordinates and
//! draws them onto a map: markers, connecting paths, driving routes and
//! click-to-locate. All provider traffic goes through a backend proxy.
//!
//! # High-Level API
//!
//! The [`overlay`] module holds the map session, created from an SDK
//! backend in [`sdk`]:
//!
//! ```ignore
//! use tripmap::overlay::{init_map, MarkerRequest, PathStyle};
//! use tripmap::sdk::{HeadlessSdk, MapOptions};
//!
//! let sdk = HeadlessSdk::new(client, endpoints);
//! let mut session = init_map(&sdk, &MapOptions::default()).expect("map");
//!
//! let report = session.resolve_all(&["西湖", "灵隐寺"], Some("杭州")).await;
//! let stops: Vec<_> = report.locations().cloned().collect();
//! session.draw_path(&stops, PathStyle::default());
//! ```

pub mod batch;
pub mod config;
pub mod coord;
pub mod gateway;
pub mod logging;
pub mod overlay;
pub mod provider;
pub mod sdk;

/// Version of the tripmap library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
