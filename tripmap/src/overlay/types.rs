//! Overlay handles and the options handed to a map surface.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::coord::{LngLat, Location};

/// Default path stroke color.
pub const DEFAULT_PATH_COLOR: &str = "#3b82f6";

/// Path stroke width in pixels.
pub const PATH_STROKE_WEIGHT: u32 = 6;

/// Path stroke opacity.
pub const PATH_STROKE_OPACITY: f64 = 0.8;

/// Identifies a marker within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MarkerId(pub u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

/// Identifies a polyline within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PolylineId(pub u64);

impl fmt::Display for PolylineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "polyline-{}", self.0)
    }
}

/// Custom marker image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerIcon {
    /// Image URL
    pub image: String,
    /// Display size in pixels, `[width, height]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<[u32; 2]>,
}

impl MarkerIcon {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            size: None,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some([width, height]);
        self
    }
}

/// Marker click or right-click binding.
pub type MarkerCallback = Box<dyn FnMut(&MarkerHandle) + Send>;

/// Everything needed to place one marker.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tripmap::coord::{LngLat, Location};
/// use tripmap::overlay::MarkerRequest;
///
/// let location = Location::new("西湖", LngLat::new(120.14, 30.25).unwrap());
/// let request = MarkerRequest::new(location)
///     .with_label("Day 1")
///     .with_custom_data(json!({"activity_id": 42}));
/// ```
pub struct MarkerRequest {
    pub(crate) location: Location,
    pub(crate) label: Option<String>,
    pub(crate) icon: Option<MarkerIcon>,
    pub(crate) on_click: Option<MarkerCallback>,
    pub(crate) on_right_click: Option<MarkerCallback>,
    pub(crate) custom_data: Option<Value>,
}

impl MarkerRequest {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            label: None,
            icon: None,
            on_click: None,
            on_right_click: None,
            custom_data: None,
        }
    }

    /// Text shown above the marker.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_icon(mut self, icon: MarkerIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Runs on click instead of the default info window.
    ///
    /// The click does not propagate to the map-click listener.
    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&MarkerHandle) + Send + 'static,
    {
        self.on_click = Some(Box::new(callback));
        self
    }

    /// Runs on right-click; the native context menu is suppressed.
    pub fn on_right_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&MarkerHandle) + Send + 'static,
    {
        self.on_right_click = Some(Box::new(callback));
        self
    }

    /// Opaque caller payload, returned through [`MarkerHandle::custom_data`].
    pub fn with_custom_data(mut self, data: Value) -> Self {
        self.custom_data = Some(data);
        self
    }

    /// Options handed to the surface for this marker.
    pub(crate) fn surface_options(&self) -> MarkerOptions {
        MarkerOptions {
            position: self.location.position(),
            title: self.location.name().to_string(),
            label: self.label.clone(),
            icon: self.icon.clone(),
        }
    }
}

impl fmt::Debug for MarkerRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerRequest")
            .field("location", &self.location)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("on_click", &self.on_click.is_some())
            .field("on_right_click", &self.on_right_click.is_some())
            .field("custom_data", &self.custom_data)
            .finish()
    }
}

struct MarkerInner {
    id: MarkerId,
    location: Location,
    label: Option<String>,
    custom_data: Option<Value>,
}

/// Reference to a live marker. Cheap to clone.
#[derive(Clone)]
pub struct MarkerHandle {
    inner: Arc<MarkerInner>,
}

impl MarkerHandle {
    pub(crate) fn new(
        id: MarkerId,
        location: Location,
        label: Option<String>,
        custom_data: Option<Value>,
    ) -> Self {
        Self {
            inner: Arc::new(MarkerInner {
                id,
                location,
                label,
                custom_data,
            }),
        }
    }

    pub fn id(&self) -> MarkerId {
        self.inner.id
    }

    pub fn location(&self) -> &Location {
        &self.inner.location
    }

    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    pub fn custom_data(&self) -> Option<&Value> {
        self.inner.custom_data.as_ref()
    }
}

impl PartialEq for MarkerHandle {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl fmt::Debug for MarkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerHandle")
            .field("id", &self.inner.id)
            .field("location", &self.inner.location)
            .field("label", &self.inner.label)
            .finish()
    }
}

/// Stroke settings for [`draw_path`](super::MapSession::draw_path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStyle {
    color: String,
    show_direction: bool,
}

impl PathStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Draw direction arrows along the path.
    pub fn with_direction(mut self, show: bool) -> Self {
        self.show_direction = show;
        self
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn show_direction(&self) -> bool {
        self.show_direction
    }

    pub(crate) fn surface_options(&self, path: Vec<LngLat>) -> PolylineOptions {
        PolylineOptions {
            path,
            stroke_color: self.color.clone(),
            stroke_weight: PATH_STROKE_WEIGHT,
            stroke_opacity: PATH_STROKE_OPACITY,
            line_join: LineShape::Round,
            line_cap: LineShape::Round,
            show_direction: self.show_direction,
        }
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_PATH_COLOR.to_string(),
            show_direction: true,
        }
    }
}

struct PolylineInner {
    id: PolylineId,
    path: Vec<LngLat>,
    style: PathStyle,
}

/// Reference to a live polyline. Cheap to clone.
#[derive(Clone)]
pub struct PolylineHandle {
    inner: Arc<PolylineInner>,
}

impl PolylineHandle {
    pub(crate) fn new(id: PolylineId, path: Vec<LngLat>, style: PathStyle) -> Self {
        Self {
            inner: Arc::new(PolylineInner { id, path, style }),
        }
    }

    pub fn id(&self) -> PolylineId {
        self.inner.id
    }

    /// The path, at least two points.
    pub fn path(&self) -> &[LngLat] {
        &self.inner.path
    }

    pub fn style(&self) -> &PathStyle {
        &self.inner.style
    }
}

impl PartialEq for PolylineHandle {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl fmt::Debug for PolylineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolylineHandle")
            .field("id", &self.inner.id)
            .field("points", &self.inner.path.len())
            .field("style", &self.inner.style)
            .finish()
    }
}

/// Marker as a surface draws it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerOptions {
    pub position: LngLat,
    /// Hover title, the location's name
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<MarkerIcon>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineShape {
    Round,
    Miter,
    Bevel,
}

/// Polyline as a surface draws it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolylineOptions {
    pub path: Vec<LngLat>,
    pub stroke_color: String,
    pub stroke_weight: u32,
    pub stroke_opacity: f64,
    pub line_join: LineShape,
    pub line_cap: LineShape,
    pub show_direction: bool,
}

/// Default marker popup: the location's name and address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoWindow {
    pub position: LngLat,
    pub title: String,
    /// Address line, empty when unknown
    pub body: String,
}

impl InfoWindow {
    pub fn for_location(location: &Location) -> Self {
        Self {
            position: location.position(),
            title: location.name().to_string(),
            body: location.address().unwrap_or_default().to_string(),
        }
    }
}
