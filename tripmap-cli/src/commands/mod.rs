//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (get, set, list, path)
//! - [`geocode`] - Freeform address geocoding
//! - [`plot`] - Resolve an itinerary and export its map overlays
//! - [`resolve`] - Batch place-name resolution
//! - [`reverse`] - Coordinate to address
//! - [`route`] - Driving route between resolved places

pub mod common;
pub mod config;
pub mod geocode;
pub mod plot;
pub mod resolve;
pub mod reverse;
pub mod route;
