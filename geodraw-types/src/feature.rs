//! Feature records emitted for drawn shapes.

use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;
use crate::shape_kind::ShapeKind;

/// Identifier of a drawn shape.
///
/// Identifiers are opaque strings. They are used as correlation keys between the shapes on the map and the records
/// the host application stores, so they stay the same for the whole life of a shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FeatureId(String);

impl FeatureId {
    /// Creates an identifier from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// String value of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FeatureId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FeatureId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FeatureId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FeatureId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Normalized representation of a drawn shape.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeatureRecord {
    /// Stable identifier of the shape.
    pub id: FeatureId,
    /// Kind of the shape. Never changes after creation.
    pub kind: ShapeKind,
    /// Current geometry of the shape.
    pub geometry: Geometry,
}

impl FeatureRecord {
    /// Creates a new record.
    pub fn new(id: impl Into<FeatureId>, kind: ShapeKind, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            kind,
            geometry,
        }
    }
}
