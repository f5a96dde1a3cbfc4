//! One live map surface and everything drawn on it.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::click::{ClickCallback, ClickListener, ClickLocation, ReverseGeocoder};
use super::interaction::InteractionFlags;
use super::route::{DrivingPolicy, RawRoute, RouteFailure, RoutePlanner, RouteRequest};
use super::surface::{EventOutcome, MapEvent, MapSurface};
use super::types::{
    InfoWindow, MarkerCallback, MarkerHandle, MarkerId, MarkerRequest, PathStyle,
    PolylineHandle, PolylineId,
};
use crate::batch::{BatchReport, BatchResolver};
use crate::coord::{Bounds, LngLat, Location};
use crate::gateway::{GeocodingGateway, GeocodingResult};
use crate::sdk::{MapOptions, MapSdk};

struct MarkerEntry {
    handle: MarkerHandle,
    on_click: Option<MarkerCallback>,
    on_right_click: Option<MarkerCallback>,
}

/// Creates a session on a fresh surface.
///
/// Returns `None`, with an error-level log, when the SDK is not loaded or the
/// surface cannot be constructed. Sessions are independent; any number may
/// exist at once.
pub fn init_map<K: MapSdk>(sdk: &K, options: &MapOptions) -> Option<MapSession<K>> {
    if !sdk.is_loaded() {
        error!("Map SDK not loaded");
        return None;
    }

    let surface = match sdk.create_surface(options) {
        Ok(surface) => surface,
        Err(e) => {
            error!(error = %e, "Failed to create map surface");
            return None;
        }
    };

    info!(
        container = options.container(),
        center = %options.center(),
        zoom = options.zoom(),
        "Map session initialized"
    );

    Some(MapSession {
        surface,
        gateway: GeocodingGateway::new(
            sdk.place_search(),
            sdk.geocoder(),
            options.gateway().clone(),
        ),
        reverse: Arc::new(sdk.reverse_geocoder()),
        routes: sdk.route_planner(),
        batch: BatchResolver::new(*options.batch()),
        markers: Vec::new(),
        polylines: Vec::new(),
        interaction_enabled: true,
        click: ClickListener::new(),
        next_marker: 0,
        next_polyline: 0,
        destroyed: false,
    })
}

/// A map surface plus its services and overlay state.
///
/// Mutated through `&mut self` only. Dropping a session destroys its surface.
pub struct MapSession<K: MapSdk> {
    surface: K::Surface,
    gateway: GeocodingGateway<K::PlaceSearch, K::Geocoder>,
    reverse: Arc<K::ReverseGeocoder>,
    routes: K::RoutePlanner,
    batch: BatchResolver,
    markers: Vec<MarkerEntry>,
    polylines: Vec<PolylineHandle>,
    interaction_enabled: bool,
    click: ClickListener,
    next_marker: u64,
    next_polyline: u64,
    destroyed: bool,
}

impl<K: MapSdk> MapSession<K> {
    // ---- resolution ----

    pub fn gateway(&self) -> &GeocodingGateway<K::PlaceSearch, K::Geocoder> {
        &self.gateway
    }

    /// See [`GeocodingGateway::resolve_place`].
    pub async fn resolve_place(&self, keyword: &str, city: Option<&str>) -> GeocodingResult {
        self.gateway.resolve_place(keyword, city).await
    }

    /// See [`GeocodingGateway::geocode_address`].
    pub async fn geocode_address(&self, address: &str) -> GeocodingResult {
        self.gateway.geocode_address(address).await
    }

    /// Resolves every name through place search, sequentially and rate-limited.
    pub async fn resolve_all<S: AsRef<str>>(
        &self,
        names: &[S],
        city: Option<&str>,
    ) -> BatchReport {
        let strategy = self.gateway.by_place_search(city);
        self.batch.resolve_all(&strategy, names).await
    }

    // ---- overlays ----

    /// Places a marker and binds its click handlers.
    pub fn add_marker(&mut self, request: MarkerRequest) -> MarkerHandle {
        self.next_marker += 1;
        let id = MarkerId(self.next_marker);

        self.surface.add_marker(id, &request.surface_options());

        let MarkerRequest {
            location,
            label,
            on_click,
            on_right_click,
            custom_data,
            ..
        } = request;

        let position = location.position();
        debug!(%id, name = location.name(), %position, "Marker added");

        let handle = MarkerHandle::new(id, location, label, custom_data);
        self.markers.push(MarkerEntry {
            handle: handle.clone(),
            on_click,
            on_right_click,
        });
        handle
    }

    /// Draws a path through `locations` in order.
    ///
    /// Returns `None` for fewer than two points.
    pub fn draw_path(
        &mut self,
        locations: &[Location],
        style: PathStyle,
    ) -> Option<PolylineHandle> {
        let points: Vec<LngLat> = locations.iter().map(Location::position).collect();
        self.draw_points(points, style)
    }

    fn draw_points(&mut self, points: Vec<LngLat>, style: PathStyle) -> Option<PolylineHandle> {
        if points.len() < 2 {
            debug!(points = points.len(), "Path needs at least two points");
            return None;
        }

        self.next_polyline += 1;
        let id = PolylineId(self.next_polyline);
        self.surface.add_polyline(id, &style.surface_options(points.clone()));

        debug!(%id, points = points.len(), color = style.color(), "Polyline added");

        let handle = PolylineHandle::new(id, points, style);
        self.polylines.push(handle.clone());
        Some(handle)
    }

    /// Plans the fastest driving route and draws its geometry.
    ///
    /// Both outcomes carry the provider's raw payload.
    pub async fn draw_driving_route(
        &mut self,
        start: &Location,
        end: &Location,
        waypoints: &[Location],
    ) -> Result<RawRoute, RouteFailure> {
        let request = RouteRequest {
            origin: start.position(),
            destination: end.position(),
            waypoints: waypoints.iter().map(Location::position).collect(),
            policy: DrivingPolicy::LeastTime,
        };

        match self.routes.plan(&request).await {
            Ok(route) => {
                info!(from = start.name(), to = end.name(), "Driving route planned");
                self.draw_points(route.path_points(), PathStyle::default());
                Ok(route)
            }
            Err(failure) => {
                error!(
                    from = start.name(),
                    to = end.name(),
                    payload = %failure.0,
                    "Driving route failed"
                );
                Err(failure)
            }
        }
    }

    pub fn clear_markers(&mut self) {
        if self.markers.is_empty() {
            return;
        }
        let count = self.markers.len();
        for entry in self.markers.drain(..) {
            self.surface.remove_marker(entry.handle.id());
        }
        debug!(count, "Markers cleared");
    }

    pub fn clear_polylines(&mut self) {
        if self.polylines.is_empty() {
            return;
        }
        let count = self.polylines.len();
        for handle in self.polylines.drain(..) {
            self.surface.remove_polyline(handle.id());
        }
        debug!(count, "Polylines cleared");
    }

    /// Clears markers, polylines and everything else on the surface.
    pub fn clear_all(&mut self) {
        self.clear_markers();
        self.clear_polylines();
        self.surface.clear();
    }

    /// Fits the viewport to all live markers. No-op without markers.
    pub fn fit_view(&mut self) {
        let positions: Vec<LngLat> = self
            .markers
            .iter()
            .map(|entry| entry.handle.location().position())
            .collect();

        if let Some(bounds) = Bounds::enclosing(&positions) {
            self.surface.set_fit_view(&bounds);
        }
    }

    // ---- events ----

    /// Registers the map-click listener, replacing any previous one.
    ///
    /// The listener receives the clicked coordinate plus, when reverse
    /// geocoding succeeds, the address near it.
    pub fn on_map_click<F>(&mut self, callback: F)
    where
        F: FnMut(ClickLocation) + Send + 'static,
    {
        let callback: ClickCallback = Box::new(callback);
        self.click.register(callback);
    }

    /// Removes the map-click listener. Lookups still in flight are discarded.
    pub fn off_map_click(&mut self) {
        self.click.clear();
    }

    pub fn has_click_listener(&self) -> bool {
        self.click.is_registered()
    }

    /// Routes a host event to marker bindings or the map-click listener.
    pub fn dispatch(&mut self, event: MapEvent) -> EventOutcome {
        let mut outcome = EventOutcome::default();

        match event {
            MapEvent::Click(position) => {
                outcome.click_forwarded = self.forward_click(position);
            }
            MapEvent::MarkerClick(id) => {
                let Some(entry) = self.markers.iter_mut().find(|e| e.handle.id() == id) else {
                    debug!(%id, "Click on unknown marker");
                    return outcome;
                };

                if let Some(callback) = entry.on_click.as_mut() {
                    callback(&entry.handle);
                    outcome.default_prevented = true;
                } else {
                    let location = entry.handle.location().clone();
                    self.surface.open_info_window(&InfoWindow::for_location(&location));
                    outcome.popup_opened = true;
                    outcome.click_forwarded = self.forward_click(location.position());
                }
            }
            MapEvent::MarkerRightClick(id) => {
                let entry = self.markers.iter_mut().find(|e| e.handle.id() == id);
                if let Some(entry) = entry {
                    if let Some(callback) = entry.on_right_click.as_mut() {
                        callback(&entry.handle);
                        outcome.default_prevented = true;
                        outcome.context_menu_suppressed = true;
                    }
                }
            }
        }

        outcome
    }

    /// Starts reverse resolution for the registered listener, if any.
    fn forward_click(&self, position: LngLat) -> bool {
        let Some(generation) = self.click.current() else {
            return false;
        };
        let radius = self.gateway.config().reverse_radius();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let reverse = Arc::clone(&self.reverse);
                let listener = self.click.clone();
                handle.spawn(async move {
                    let address = match reverse.reverse(position, radius).await {
                        Ok(address) => Some(address),
                        Err(e) => {
                            warn!(%position, error = %e, "Reverse geocoding failed");
                            None
                        }
                    };
                    listener.deliver(generation, ClickLocation::new(position, address));
                });
            }
            Err(_) => {
                warn!(%position, "No async runtime; delivering click without address");
                self.click.deliver(generation, ClickLocation::new(position, None));
            }
        }
        true
    }

    // ---- interaction ----

    /// Freezes drag, zoom, double-click zoom, scroll wheel and touch zoom.
    pub fn disable_interaction(&mut self) {
        if !self.interaction_enabled {
            return;
        }
        self.surface.set_interaction(InteractionFlags::all_disabled());
        self.interaction_enabled = false;
        debug!("Map interaction disabled");
    }

    pub fn enable_interaction(&mut self) {
        if self.interaction_enabled {
            return;
        }
        self.surface.set_interaction(InteractionFlags::all_enabled());
        self.interaction_enabled = true;
        debug!("Map interaction enabled");
    }

    pub fn interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }

    // ---- inspection ----

    pub fn markers(&self) -> impl ExactSizeIterator<Item = &MarkerHandle> + '_ {
        self.markers.iter().map(|entry| &entry.handle)
    }

    pub fn marker(&self, id: MarkerId) -> Option<&MarkerHandle> {
        self.markers().find(|handle| handle.id() == id)
    }

    pub fn polylines(&self) -> &[PolylineHandle] {
        &self.polylines
    }

    pub fn surface(&self) -> &K::Surface {
        &self.surface
    }

    // ---- lifecycle ----

    /// Releases the surface and forgets every overlay and listener.
    pub fn destroy(self) {
        drop(self);
    }

    fn teardown(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.click.clear();
        let markers = self.markers.len();
        let polylines = self.polylines.len();
        self.markers.clear();
        self.polylines.clear();
        self.surface.destroy();
        info!(markers, polylines, "Map session destroyed");
    }
}

impl<K: MapSdk> Drop for MapSession<K> {
    fn drop(&mut self) {
        self.teardown();
    }
}
