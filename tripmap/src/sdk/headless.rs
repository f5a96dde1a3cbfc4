//! In-process map backend.
//!
//! [`HeadlessSurface`] keeps overlays in memory instead of drawing them and can
//! export its current state as a GeoJSON `FeatureCollection`. [`HeadlessSdk`]
//! pairs it with the proxy-backed services.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, warn};

use super::proxy::{ProxyReverseGeocoder, ProxyRoutePlanner};
use super::{MapOptions, MapSdk, ViewMode};
use crate::coord::{Bounds, LngLat};
use crate::gateway::{ProxyGeocoder, ProxyPlaceSearch};
use crate::overlay::{
    InfoWindow, InteractionFlags, MapSurface, MarkerId, MarkerOptions, PolylineId,
    PolylineOptions,
};
use crate::provider::{AsyncHttpClient, ProviderError, ProxyEndpoints};

/// Map surface that records overlays in memory.
#[derive(Debug)]
pub struct HeadlessSurface {
    container: String,
    center: LngLat,
    zoom: f64,
    view_mode: ViewMode,
    pitch: f64,
    markers: BTreeMap<MarkerId, MarkerOptions>,
    polylines: BTreeMap<PolylineId, PolylineOptions>,
    info_window: Option<InfoWindow>,
    info_windows_opened: usize,
    viewport: Option<Bounds>,
    interaction: InteractionFlags,
    interaction_updates: usize,
    destroyed: bool,
    live: Arc<AtomicUsize>,
}

impl HeadlessSurface {
    /// Standalone surface not tracked by any SDK.
    pub fn new(options: &MapOptions) -> Self {
        Self::tracked(options, Arc::new(AtomicUsize::new(0)))
    }

    fn tracked(options: &MapOptions, live: Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Self {
            container: options.container().to_string(),
            center: options.center(),
            zoom: options.zoom(),
            view_mode: options.view_mode(),
            pitch: match options.view_mode() {
                ViewMode::ThreeD => options.pitch(),
                ViewMode::TwoD => 0.0,
            },
            markers: BTreeMap::new(),
            polylines: BTreeMap::new(),
            info_window: None,
            info_windows_opened: 0,
            viewport: None,
            interaction: InteractionFlags::all_enabled(),
            interaction_updates: 0,
            destroyed: false,
            live,
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Camera center: the initial one, or the center of the last fitted view.
    pub fn center(&self) -> LngLat {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Camera pitch in degrees; always zero in [`ViewMode::TwoD`].
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn polyline_count(&self) -> usize {
        self.polylines.len()
    }

    pub fn marker(&self, id: MarkerId) -> Option<&MarkerOptions> {
        self.markers.get(&id)
    }

    pub fn polyline(&self, id: PolylineId) -> Option<&PolylineOptions> {
        self.polylines.get(&id)
    }

    /// The currently open info window.
    pub fn info_window(&self) -> Option<&InfoWindow> {
        self.info_window.as_ref()
    }

    /// How many info windows were opened over the surface's lifetime.
    pub fn info_windows_opened(&self) -> usize {
        self.info_windows_opened
    }

    pub fn viewport(&self) -> Option<&Bounds> {
        self.viewport.as_ref()
    }

    pub fn interaction(&self) -> InteractionFlags {
        self.interaction
    }

    /// How many times the interaction flags were written.
    pub fn interaction_updates(&self) -> usize {
        self.interaction_updates
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Current overlays as a GeoJSON `FeatureCollection`.
    ///
    /// Markers become `Point` features and polylines `LineString` features
    /// carrying simplestyle stroke properties. The fitted viewport, if any,
    /// is exported as `bbox`, and the camera as a `view` foreign member.
    pub fn to_geojson(&self) -> Value {
        let mut features = Vec::with_capacity(self.markers.len() + self.polylines.len());

        for (id, marker) in &self.markers {
            let mut properties = json!({
                "id": id.to_string(),
                "title": marker.title,
            });
            if let Some(label) = &marker.label {
                properties["label"] = json!(label);
            }
            if let Some(icon) = &marker.icon {
                properties["icon"] = json!(icon);
            }
            features.push(json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [marker.position.lng, marker.position.lat],
                },
                "properties": properties,
            }));
        }

        for (id, line) in &self.polylines {
            let coordinates: Vec<[f64; 2]> = line.path.iter().map(|p| [p.lng, p.lat]).collect();
            features.push(json!({
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": coordinates,
                },
                "properties": {
                    "id": id.to_string(),
                    "stroke": line.stroke_color,
                    "stroke-width": line.stroke_weight,
                    "stroke-opacity": line.stroke_opacity,
                    "show-direction": line.show_direction,
                },
            }));
        }

        let mut collection = json!({
            "type": "FeatureCollection",
            "features": features,
            "view": {
                "center": [self.center.lng, self.center.lat],
                "zoom": self.zoom,
                "pitch": self.pitch,
                "mode": self.view_mode.as_str(),
            },
        });
        if let Some(bounds) = &self.viewport {
            collection["bbox"] = json!([
                bounds.south_west.lng,
                bounds.south_west.lat,
                bounds.north_east.lng,
                bounds.north_east.lat,
            ]);
        }
        collection
    }

    fn usable(&self, operation: &str) -> bool {
        if self.destroyed {
            warn!(operation, container = %self.container, "Surface already destroyed");
        }
        !self.destroyed
    }
}

impl MapSurface for HeadlessSurface {
    fn add_marker(&mut self, id: MarkerId, options: &MarkerOptions) {
        if self.usable("add_marker") {
            self.markers.insert(id, options.clone());
        }
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.remove(&id);
    }

    fn add_polyline(&mut self, id: PolylineId, options: &PolylineOptions) {
        if self.usable("add_polyline") {
            self.polylines.insert(id, options.clone());
        }
    }

    fn remove_polyline(&mut self, id: PolylineId) {
        self.polylines.remove(&id);
    }

    fn open_info_window(&mut self, window: &InfoWindow) {
        if self.usable("open_info_window") {
            self.info_window = Some(window.clone());
            self.info_windows_opened += 1;
        }
    }

    fn set_fit_view(&mut self, bounds: &Bounds) {
        if self.usable("set_fit_view") {
            self.viewport = Some(*bounds);
            self.center = bounds.center();
        }
    }

    fn set_interaction(&mut self, flags: InteractionFlags) {
        if self.usable("set_interaction") {
            self.interaction = flags;
            self.interaction_updates += 1;
        }
    }

    fn clear(&mut self) {
        self.markers.clear();
        self.polylines.clear();
        self.info_window = None;
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.clear();
        self.destroyed = true;
        self.live.fetch_sub(1, Ordering::SeqCst);
        debug!(container = %self.container, "Surface destroyed");
    }
}

/// Map SDK backed by in-memory surfaces and the backend map proxy.
#[derive(Clone)]
pub struct HeadlessSdk<C> {
    client: C,
    endpoints: ProxyEndpoints,
    loaded: bool,
    live: Arc<AtomicUsize>,
}

impl<C> HeadlessSdk<C>
where
    C: AsyncHttpClient + Clone + 'static,
{
    pub fn new(client: C, endpoints: ProxyEndpoints) -> Self {
        Self {
            client,
            endpoints,
            loaded: true,
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Simulates a library that failed to load.
    pub fn with_loaded(mut self, loaded: bool) -> Self {
        self.loaded = loaded;
        self
    }

    /// Surfaces created and not yet destroyed.
    pub fn live_surfaces(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn endpoints(&self) -> &ProxyEndpoints {
        &self.endpoints
    }
}

impl<C> MapSdk for HeadlessSdk<C>
where
    C: AsyncHttpClient + Clone + 'static,
{
    type Surface = HeadlessSurface;
    type Geocoder = ProxyGeocoder<C>;
    type PlaceSearch = ProxyPlaceSearch<C>;
    type ReverseGeocoder = ProxyReverseGeocoder<C>;
    type RoutePlanner = ProxyRoutePlanner<C>;

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn create_surface(&self, options: &MapOptions) -> Result<HeadlessSurface, ProviderError> {
        if !self.loaded {
            return Err(ProviderError::SdkUnavailable(
                "headless SDK not loaded".to_string(),
            ));
        }
        Ok(HeadlessSurface::tracked(options, Arc::clone(&self.live)))
    }

    fn geocoder(&self) -> ProxyGeocoder<C> {
        ProxyGeocoder::new(self.client.clone(), self.endpoints.clone())
    }

    fn place_search(&self) -> ProxyPlaceSearch<C> {
        ProxyPlaceSearch::new(self.client.clone(), self.endpoints.clone())
    }

    fn reverse_geocoder(&self) -> ProxyReverseGeocoder<C> {
        ProxyReverseGeocoder::new(self.client.clone(), self.endpoints.clone())
    }

    fn route_planner(&self) -> ProxyRoutePlanner<C> {
        ProxyRoutePlanner::new(self.client.clone(), self.endpoints.clone())
    }
}
