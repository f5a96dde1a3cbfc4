//! Interaction mode controller
//!
//! The map is either fully interactive or frozen; there is no partial state.
//! Freezing is used while a modal edit elsewhere in the app is open.

use serde::Serialize;

/// The six user-manipulation switches of a map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InteractionFlags {
    pub drag: bool,
    pub zoom: bool,
    pub double_click_zoom: bool,
    pub scroll_wheel: bool,
    pub touch_zoom: bool,
    pub touch_zoom_center: bool,
}

impl InteractionFlags {
    pub const fn all_enabled() -> Self {
        Self::uniform(true)
    }

    pub const fn all_disabled() -> Self {
        Self::uniform(false)
    }

    const fn uniform(on: bool) -> Self {
        Self {
            drag: on,
            zoom: on,
            double_click_zoom: on,
            scroll_wheel: on,
            touch_zoom: on,
            touch_zoom_center: on,
        }
    }

    pub fn is_all_enabled(&self) -> bool {
        *self == Self::all_enabled()
    }

    pub fn is_all_disabled(&self) -> bool {
        *self == Self::all_disabled()
    }
}

impl Default for InteractionFlags {
    fn default() -> Self {
        Self::all_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_enabled() {
        assert!(InteractionFlags::default().is_all_enabled());
        assert!(InteractionFlags::all_disabled().is_all_disabled());
    }

    #[test]
    fn test_partial_state_is_neither() {
        let flags = InteractionFlags {
            drag: false,
            ..InteractionFlags::all_enabled()
        };
        assert!(!flags.is_all_enabled());
        assert!(!flags.is_all_disabled());
    }
}
