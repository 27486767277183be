//! Concrete geographic point types.

mod point;

pub use point::GeoPoint2d;
