//! See [`ShapeKind`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeodrawTypesError;

/// Kind of a drawn shape.
///
/// The kind decides which normalization rule applies to a shape and which change events are listened to. It is
/// fixed at creation time and never changes for the lifetime of a feature.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Single position (a marker).
    Point,
    /// Open polyline.
    Line,
    /// Polygon with a free-form path.
    Polygon,
    /// Circle given by center and radius.
    Circle,
    /// Axis-aligned rectangle given by its bounds.
    Rectangle,
}

impl ShapeKind {
    /// All supported kinds.
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Point,
        ShapeKind::Line,
        ShapeKind::Polygon,
        ShapeKind::Circle,
        ShapeKind::Rectangle,
    ];

    /// Name of the kind as used in feature records.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Point => "point",
            ShapeKind::Line => "line",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Circle => "circle",
            ShapeKind::Rectangle => "rectangle",
        }
    }

    /// Name of the overlay type the map SDK uses for shapes of this kind.
    pub fn overlay_type(&self) -> &'static str {
        match self {
            ShapeKind::Point => "marker",
            ShapeKind::Line => "polyline",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Circle => "circle",
            ShapeKind::Rectangle => "rectangle",
        }
    }

    /// Parses an SDK overlay type name. Returns `None` for overlay types that have no shape kind.
    pub fn from_overlay_type(overlay_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.overlay_type() == overlay_type)
    }

    /// Returns true if shapes of this kind can be recreated from a stored feature record.
    pub fn supports_rehydration(&self) -> bool {
        matches!(self, ShapeKind::Line | ShapeKind::Polygon)
    }
}

impl Display for ShapeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = GeodrawTypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| GeodrawTypesError::UnknownShapeKind(s.to_string()))
    }
}
