//! Reverse-resolution on click
//!
//! A single map-click listener receives `{lng, lat, address?}`. The address is
//! looked up best-effort: any lookup failure still delivers the coordinate.
//!
//! Lookups run as spawned tasks. Every registration gets a new generation
//! number, and a finished lookup is delivered only if its generation is still
//! the registered one, so results arriving after `off_map_click`, after a
//! replacing `on_map_click`, or after `destroy` are dropped.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, trace};

use crate::coord::LngLat;
use crate::provider::ProviderError;

/// Payload delivered to the map-click listener.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickLocation {
    pub lng: f64,
    pub lat: f64,
    /// Absent when the reverse lookup failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ClickLocation {
    pub fn new(position: LngLat, address: Option<String>) -> Self {
        Self {
            lng: position.lng,
            lat: position.lat,
            address,
        }
    }

    pub fn position(&self) -> LngLat {
        LngLat {
            lng: self.lng,
            lat: self.lat,
        }
    }
}

/// Map-click listener.
pub type ClickCallback = Box<dyn FnMut(ClickLocation) + Send>;

/// Coordinate → address service.
pub trait ReverseGeocoder: Send + Sync {
    /// Formatted address near `position`, searching within `radius` meters.
    fn reverse(
        &self,
        position: LngLat,
        radius: u32,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

struct Registration {
    generation: u64,
    callback: ClickCallback,
}

#[derive(Default)]
struct SlotState {
    current: Option<Registration>,
    next_generation: u64,
}

/// The single listener slot, shared with in-flight lookups.
#[derive(Clone, Default)]
pub(crate) struct ClickListener {
    state: Arc<Mutex<SlotState>>,
}

impl ClickListener {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Installs `callback`, replacing any previous listener.
    pub(crate) fn register(&self, callback: ClickCallback) -> u64 {
        let mut state = self.lock();
        state.next_generation += 1;
        let generation = state.next_generation;
        if state.current.is_some() {
            debug!(generation, "Replacing map-click listener");
        }
        state.current = Some(Registration {
            generation,
            callback,
        });
        generation
    }

    pub(crate) fn clear(&self) {
        self.lock().current = None;
    }

    /// Generation of the registered listener, if any.
    pub(crate) fn current(&self) -> Option<u64> {
        self.lock().current.as_ref().map(|r| r.generation)
    }

    pub(crate) fn is_registered(&self) -> bool {
        self.current().is_some()
    }

    /// Delivers to the listener registered as `generation`.
    ///
    /// Returns `false` (and drops `location`) when that listener is gone.
    pub(crate) fn deliver(&self, generation: u64, location: ClickLocation) -> bool {
        let mut state = self.lock();
        match state.current.as_mut() {
            Some(registration) if registration.generation == generation => {
                (registration.callback)(location);
                true
            }
            _ => {
                trace!(generation, "Dropping stale click result");
                false
            }
        }
    }
}
