//! The drawing capability a map backend provides to a session.

use super::interaction::InteractionFlags;
use super::types::{InfoWindow, MarkerId, MarkerOptions, PolylineId, PolylineOptions};
use crate::coord::{Bounds, LngLat};

/// One live map surface.
///
/// Sessions own their surface exclusively and call it synchronously.
/// Implementations must tolerate `clear` and `destroy` being called repeatedly.
pub trait MapSurface: Send {
    fn add_marker(&mut self, id: MarkerId, options: &MarkerOptions);

    /// Used by bulk clears only.
    fn remove_marker(&mut self, id: MarkerId);

    fn add_polyline(&mut self, id: PolylineId, options: &PolylineOptions);

    /// Used by bulk clears only.
    fn remove_polyline(&mut self, id: PolylineId);

    fn open_info_window(&mut self, window: &InfoWindow);

    /// Moves the viewport so `bounds` is fully visible.
    fn set_fit_view(&mut self, bounds: &Bounds);

    fn set_interaction(&mut self, flags: InteractionFlags);

    /// Removes every overlay, info windows included.
    fn clear(&mut self);

    /// Releases the surface. Nothing may be drawn afterwards.
    fn destroy(&mut self);
}

/// A user event delivered by the host to [`MapSession::dispatch`](super::MapSession::dispatch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    /// Left click on the bare map
    Click(LngLat),
    MarkerClick(MarkerId),
    MarkerRightClick(MarkerId),
}

/// What dispatching an event did, for the host to act on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The host must not run its own default handling
    pub default_prevented: bool,
    /// A default info window was opened
    pub popup_opened: bool,
    /// The native context menu must not be shown
    pub context_menu_suppressed: bool,
    /// A map-click listener received the click
    pub click_forwarded: bool,
}
