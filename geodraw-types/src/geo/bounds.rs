use serde::{Deserialize, Serialize};

use crate::geo::impls::GeoPoint2d;
use crate::geo::{GeoPoint, NewGeoPoint};

/// Axis-aligned geographic bounds given by the south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct LatLngBounds {
    south_west: GeoPoint2d,
    north_east: GeoPoint2d,
}

impl LatLngBounds {
    /// Creates new bounds from the corners.
    pub fn new(south_west: GeoPoint2d, north_east: GeoPoint2d) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// South-west corner.
    pub fn south_west(&self) -> GeoPoint2d {
        self.south_west
    }

    /// North-east corner.
    pub fn north_east(&self) -> GeoPoint2d {
        self.north_east
    }

    /// Smallest bounds containing all the given points. Returns `None` if the iterator is empty.
    ///
    /// Longitudes are compared numerically, so bounds crossing the antimeridian are not supported.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a GeoPoint2d>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut south, mut west, mut north, mut east) =
            (first.lat(), first.lon(), first.lat(), first.lon());

        for point in iter {
            south = south.min(point.lat());
            north = north.max(point.lat());
            west = west.min(point.lon());
            east = east.max(point.lon());
        }

        Some(Self::new(
            GeoPoint2d::latlon(south, west),
            GeoPoint2d::latlon(north, east),
        ))
    }
}
