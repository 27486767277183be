use geodraw_types::geo::impls::GeoPoint2d;
use geodraw_types::{latlon, ShapeKind};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Options of the map surface. They are not interpreted by the drawing manager and are passed to the SDK as is.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapOptions {
    /// Initial center of the map.
    pub center: GeoPoint2d,
    /// Initial zoom level.
    pub zoom: f64,
    /// Identifier of the map style in the SDK.
    pub map_id: Option<String>,
    /// Show the fullscreen button.
    pub fullscreen_control: bool,
    /// Show the street view button.
    pub street_view_control: bool,
    /// Show the map type switcher.
    pub map_type_control: bool,
    /// Show the camera control.
    pub camera_control: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: latlon!(34.052235, -118.243683),
            zoom: 10.0,
            map_id: None,
            fullscreen_control: false,
            street_view_control: false,
            map_type_control: false,
            camera_control: false,
        }
    }
}

/// Style of a drawn shape.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapeStyle {
    /// Color and opacity of the outline.
    pub stroke: Color,
    /// Width of the outline in pixels.
    pub stroke_weight: f32,
    /// Color and opacity of the fill. `None` for shapes without area.
    pub fill: Option<Color>,
    /// The shape reacts to clicks.
    pub clickable: bool,
    /// The user can edit the shape after it is drawn.
    pub editable: bool,
    /// Rendering order of the shape.
    pub z_index: i32,
}

impl ShapeStyle {
    /// Editable style with the given outline color at 0.8 opacity, width of 2 pixels and optional fill at 0.35
    /// opacity.
    pub fn editable(stroke: Color, fill: Option<Color>) -> Self {
        Self {
            stroke: stroke.with_opacity(0.8),
            stroke_weight: 2.0,
            fill: fill.map(|c| c.with_opacity(0.35)),
            clickable: true,
            editable: true,
            z_index: 1,
        }
    }
}

/// Styles of each kind of drawn shape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapeStyles {
    /// Markers.
    pub marker: ShapeStyle,
    /// Polylines.
    pub polyline: ShapeStyle,
    /// Polygons.
    pub polygon: ShapeStyle,
    /// Circles.
    pub circle: ShapeStyle,
    /// Rectangles.
    pub rectangle: ShapeStyle,
}

impl ShapeStyles {
    /// Style of shapes of the given kind.
    pub fn get(&self, kind: ShapeKind) -> &ShapeStyle {
        match kind {
            ShapeKind::Point => &self.marker,
            ShapeKind::Line => &self.polyline,
            ShapeKind::Polygon => &self.polygon,
            ShapeKind::Circle => &self.circle,
            ShapeKind::Rectangle => &self.rectangle,
        }
    }
}

impl Default for ShapeStyles {
    fn default() -> Self {
        Self {
            marker: ShapeStyle::editable(Color::RED, None),
            polyline: ShapeStyle::editable(Color::RED, None),
            polygon: ShapeStyle::editable(Color::GREEN, Some(Color::GREEN)),
            circle: ShapeStyle::editable(Color::BLUE, Some(Color::BLUE)),
            rectangle: ShapeStyle::editable(Color::ORANGE, Some(Color::ORANGE)),
        }
    }
}
