//! Caller-owned slot holding at most one session.

use tracing::{error, warn};

use super::click::ClickLocation;
use super::route::{RawRoute, RouteFailure};
use super::session::{init_map, MapSession};
use super::surface::{EventOutcome, MapEvent};
use super::types::{MarkerHandle, MarkerRequest, PathStyle, PolylineHandle};
use crate::batch::BatchReport;
use crate::coord::Location;
use crate::gateway::GeocodingResult;
use crate::sdk::{MapOptions, MapSdk};

/// Reason given when an operation needs a session and there is none.
pub const NOT_INITIALIZED: &str = "map not initialized";

/// Keeps one SDK and, between `init_map` and `destroy`, one session.
///
/// Every operation invoked without a session is a no-op returning `None`
/// (or a failure value) and logs an error. Route planning rejects with
/// [`RouteFailure::not_initialized`].
pub struct MapService<K: MapSdk> {
    sdk: K,
    session: Option<MapSession<K>>,
}

impl<K: MapSdk> MapService<K> {
    pub fn new(sdk: K) -> Self {
        Self { sdk, session: None }
    }

    pub fn sdk(&self) -> &K {
        &self.sdk
    }

    /// Starts a session, destroying the current one first.
    pub fn init_map(&mut self, options: &MapOptions) -> Option<&mut MapSession<K>> {
        if let Some(previous) = self.session.take() {
            warn!("Replacing live map session");
            previous.destroy();
        }
        self.session = init_map(&self.sdk, options);
        self.session.as_mut()
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&MapSession<K>> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut MapSession<K>> {
        self.session.as_mut()
    }

    /// Destroys the session, if any. The service can be initialized again.
    pub fn destroy(&mut self) {
        if let Some(session) = self.session.take() {
            session.destroy();
        }
    }

    fn require(&mut self, operation: &'static str) -> Option<&mut MapSession<K>> {
        if self.session.is_none() {
            error!(operation, "{}", NOT_INITIALIZED);
        }
        self.session.as_mut()
    }

    fn require_ref(&self, operation: &'static str) -> Option<&MapSession<K>> {
        if self.session.is_none() {
            error!(operation, "{}", NOT_INITIALIZED);
        }
        self.session.as_ref()
    }

    pub fn add_marker(&mut self, request: MarkerRequest) -> Option<MarkerHandle> {
        Some(self.require("add_marker")?.add_marker(request))
    }

    pub fn draw_path(
        &mut self,
        locations: &[Location],
        style: PathStyle,
    ) -> Option<PolylineHandle> {
        self.require("draw_path")?.draw_path(locations, style)
    }

    pub async fn draw_driving_route(
        &mut self,
        start: &Location,
        end: &Location,
        waypoints: &[Location],
    ) -> Result<RawRoute, RouteFailure> {
        match self.require("draw_driving_route") {
            Some(session) => session.draw_driving_route(start, end, waypoints).await,
            None => Err(RouteFailure::not_initialized()),
        }
    }

    pub fn clear_markers(&mut self) {
        if let Some(session) = self.require("clear_markers") {
            session.clear_markers();
        }
    }

    pub fn clear_polylines(&mut self) {
        if let Some(session) = self.require("clear_polylines") {
            session.clear_polylines();
        }
    }

    pub fn clear_all(&mut self) {
        if let Some(session) = self.require("clear_all") {
            session.clear_all();
        }
    }

    pub fn fit_view(&mut self) {
        if let Some(session) = self.require("fit_view") {
            session.fit_view();
        }
    }

    pub fn on_map_click<F>(&mut self, callback: F)
    where
        F: FnMut(ClickLocation) + Send + 'static,
    {
        if let Some(session) = self.require("on_map_click") {
            session.on_map_click(callback);
        }
    }

    pub fn off_map_click(&mut self) {
        if let Some(session) = self.require("off_map_click") {
            session.off_map_click();
        }
    }

    pub fn dispatch(&mut self, event: MapEvent) -> EventOutcome {
        self.require("dispatch")
            .map(|session| session.dispatch(event))
            .unwrap_or_default()
    }

    pub fn disable_interaction(&mut self) {
        if let Some(session) = self.require("disable_interaction") {
            session.disable_interaction();
        }
    }

    pub fn enable_interaction(&mut self) {
        if let Some(session) = self.require("enable_interaction") {
            session.enable_interaction();
        }
    }

    pub async fn resolve_place(&self, keyword: &str, city: Option<&str>) -> GeocodingResult {
        match self.require_ref("resolve_place") {
            Some(session) => session.resolve_place(keyword, city).await,
            None => GeocodingResult::failure(NOT_INITIALIZED),
        }
    }

    pub async fn geocode_address(&self, address: &str) -> GeocodingResult {
        match self.require_ref("geocode_address") {
            Some(session) => session.geocode_address(address).await,
            None => GeocodingResult::failure(NOT_INITIALIZED),
        }
    }

    /// Without a session every input fails with [`NOT_INITIALIZED`].
    pub async fn resolve_all<S: AsRef<str>>(
        &self,
        names: &[S],
        city: Option<&str>,
    ) -> BatchReport {
        match self.require_ref("resolve_all") {
            Some(session) => session.resolve_all(names, city).await,
            None => BatchReport {
                results: names
                    .iter()
                    .map(|_| GeocodingResult::failure(NOT_INITIALIZED))
                    .collect(),
                succeeded: 0,
                failed: names.len(),
                skipped: 0,
            },
        }
    }
}
