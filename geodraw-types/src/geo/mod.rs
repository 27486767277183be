//! Geographic points (latitude and longitude, see [`GeoPoint`]), their bounds ([`LatLngBounds`]) and spherical
//! geometry on the surface of a [`Datum`].

mod bounds;
mod datum;
pub mod impls;
mod traits;

pub use bounds::LatLngBounds;
pub use datum::Datum;
pub use traits::point::{GeoPoint, NewGeoPoint};
