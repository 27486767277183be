//! Data types shared by the `geodraw` crates: geographic points and spherical math ([`geo`]), normalized
//! feature geometries ([`Geometry`]), shape kinds ([`ShapeKind`]) and the feature records emitted for every
//! drawn shape ([`FeatureRecord`]).
//!
//! Coordinates in [`Geometry`] always use the GeoJSON order: `[longitude, latitude]`. Points in the [`geo`]
//! module use the map SDK order: latitude first.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod error;
pub mod feature;
pub mod geo;
pub mod geometry;
pub mod shape_kind;

#[cfg(feature = "geo-types")]
mod geo_types;
#[cfg(feature = "geojson")]
mod geojson;

pub use feature::{FeatureId, FeatureRecord};
pub use geometry::{Geometry, Position, Ring};
pub use shape_kind::ShapeKind;
