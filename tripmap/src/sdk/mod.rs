//! Map SDK capability
//!
//! A session never talks to a concrete mapping library. It asks a [`MapSdk`]
//! for one surface plus the four services it needs:
//!
//! | Service           | Trait                                   |
//! |-------------------|-----------------------------------------|
//! | Address geocoder  | [`Geocoder`](crate::gateway::Geocoder)  |
//! | Place search      | [`PlaceSearch`](crate::gateway::PlaceSearch) |
//! | Reverse geocoder  | [`ReverseGeocoder`](crate::overlay::ReverseGeocoder) |
//! | Route planner     | [`RoutePlanner`](crate::overlay::RoutePlanner) |
//!
//! [`HeadlessSdk`] is the in-process backend: an in-memory surface that can be
//! exported as GeoJSON, with every service going through the backend proxy.

mod headless;
mod proxy;

pub use headless::{HeadlessSdk, HeadlessSurface};
pub use proxy::{ProxyReverseGeocoder, ProxyRoutePlanner};

use crate::config::{
    BatchConfig, ConfigFile, GatewayConfig, DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG,
    DEFAULT_PITCH, DEFAULT_ZOOM,
};
use crate::coord::LngLat;
use crate::gateway::{Geocoder, PlaceSearch};
use crate::overlay::{MapSurface, ReverseGeocoder, RoutePlanner};
use crate::provider::ProviderError;

/// Default DOM-style container id for new surfaces.
pub const DEFAULT_CONTAINER: &str = "map";

/// Camera projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    TwoD,
    #[default]
    ThreeD,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::TwoD => "2d",
            ViewMode::ThreeD => "3d",
        }
    }
}

/// Options for a new map session.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    container: String,
    center: LngLat,
    zoom: f64,
    view_mode: ViewMode,
    pitch: f64,
    gateway: GatewayConfig,
    batch: BatchConfig,
}

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera and service settings from the user's config file.
    pub fn from_config(config: &ConfigFile) -> Self {
        Self::default()
            .with_center(config.map.center)
            .with_zoom(config.map.zoom)
            .with_pitch(config.map.pitch)
            .with_gateway(config.gateway_config())
            .with_batch(config.batch_config())
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    pub fn with_center(mut self, center: LngLat) -> Self {
        self.center = center;
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    /// Camera pitch in degrees; only meaningful in [`ViewMode::ThreeD`].
    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn with_gateway(mut self, gateway: GatewayConfig) -> Self {
        self.gateway = gateway;
        self
    }

    pub fn with_batch(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn center(&self) -> LngLat {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn gateway(&self) -> &GatewayConfig {
        &self.gateway
    }

    pub fn batch(&self) -> &BatchConfig {
        &self.batch
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            container: DEFAULT_CONTAINER.to_string(),
            center: LngLat {
                lng: DEFAULT_CENTER_LNG,
                lat: DEFAULT_CENTER_LAT,
            },
            zoom: DEFAULT_ZOOM,
            view_mode: ViewMode::ThreeD,
            pitch: DEFAULT_PITCH,
            gateway: GatewayConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

/// A mapping library as seen by a session.
pub trait MapSdk {
    type Surface: MapSurface;
    type Geocoder: Geocoder;
    type PlaceSearch: PlaceSearch;
    type ReverseGeocoder: ReverseGeocoder + 'static;
    type RoutePlanner: RoutePlanner;

    /// Whether the library finished loading.
    fn is_loaded(&self) -> bool;

    fn create_surface(&self, options: &MapOptions) -> Result<Self::Surface, ProviderError>;

    fn geocoder(&self) -> Self::Geocoder;

    fn place_search(&self) -> Self::PlaceSearch;

    fn reverse_geocoder(&self) -> Self::ReverseGeocoder;

    fn route_planner(&self) -> Self::RoutePlanner;
}
