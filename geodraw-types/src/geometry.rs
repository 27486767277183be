//! Normalized feature geometries. See [`Geometry`].

use serde::{Deserialize, Serialize};

use crate::geo::impls::GeoPoint2d;
use crate::geo::{GeoPoint, NewGeoPoint};

/// Coordinate pair in GeoJSON order: `[longitude, latitude]`, degrees.
pub type Position = [f64; 2];

/// Ordered sequence of positions describing a polygon boundary.
pub type Ring = Vec<Position>;

/// Geometry of a feature record.
///
/// Serializes into the GeoJSON geometry layout: `{"type": "Polygon", "coordinates": [[[lng, lat], ...]]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// Single position.
    Point(Position),
    /// Ordered sequence of positions.
    LineString(Vec<Position>),
    /// List of rings. The first ring is the exterior boundary.
    Polygon(Vec<Ring>),
}

impl Geometry {
    /// GeoJSON name of the geometry type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
        }
    }

    /// Exterior ring of a polygon. `None` for other geometry types or a polygon without rings.
    pub fn exterior(&self) -> Option<&[Position]> {
        match self {
            Geometry::Polygon(rings) => rings.first().map(|ring| &ring[..]),
            _ => None,
        }
    }

    /// Total number of positions in the geometry.
    pub fn position_count(&self) -> usize {
        match self {
            Geometry::Point(_) => 1,
            Geometry::LineString(positions) => positions.len(),
            Geometry::Polygon(rings) => rings.iter().map(Vec::len).sum(),
        }
    }

    /// Appends the first position of every open polygon ring to its end. Other geometry types are left as is.
    pub fn close_rings(&mut self) {
        if let Geometry::Polygon(rings) = self {
            for ring in rings {
                if !is_closed(ring) {
                    if let Some(first) = ring.first().copied() {
                        ring.push(first);
                    }
                }
            }
        }
    }

    /// Path of the geometry in latitude-first points, as the map SDK expects it.
    ///
    /// For a line string this is the whole sequence, for a polygon its exterior ring. Points have no path.
    pub fn path(&self) -> Option<Vec<GeoPoint2d>> {
        let positions = match self {
            Geometry::LineString(positions) => &positions[..],
            Geometry::Polygon(_) => self.exterior()?,
            Geometry::Point(_) => return None,
        };

        Some(positions.iter().map(to_geo_point).collect())
    }
}

/// Returns true if the ring is non-empty and its first position equals the last one.
pub fn is_closed(ring: &[Position]) -> bool {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) => ring.len() > 1 && first == last,
        _ => false,
    }
}

/// Converts a latitude-first point into a GeoJSON position.
pub fn to_position(point: &impl GeoPoint<Num = f64>) -> Position {
    [point.lon(), point.lat()]
}

/// Converts a GeoJSON position into a latitude-first point.
pub fn to_geo_point(position: &Position) -> GeoPoint2d {
    GeoPoint2d::latlon(position[1], position[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlon;

    #[test]
    fn serializes_as_geojson_geometry() {
        let geometry = Geometry::Polygon(vec![vec![[1.0, 2.0], [3.0, 4.0], [5.0, 2.0]]]);
        let value = serde_json::to_value(&geometry).expect("serialization");
        assert_eq!(
            value,
            serde_json::json!({
                "type": "Polygon",
                "coordinates": [[[1.0, 2.0], [3.0, 4.0], [5.0, 2.0]]],
            })
        );

        let restored: Geometry = serde_json::from_value(value).expect("deserialization");
        assert_eq!(restored, geometry);
    }

    #[test]
    fn point_json() {
        let json = serde_json::to_string(&Geometry::Point([-118.25, 34.05])).expect("serialization");
        assert_eq!(json, r#"{"type":"Point","coordinates":[-118.25,34.05]}"#);
    }

    #[test]
    fn close_rings() {
        let mut geometry = Geometry::Polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]]);
        geometry.close_rings();
        assert_eq!(
            geometry.exterior().expect("polygon"),
            &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]
        );

        geometry.close_rings();
        assert_eq!(geometry.position_count(), 4);
    }

    #[test]
    fn is_closed_ring() {
        assert!(!is_closed(&[]));
        assert!(!is_closed(&[[1.0, 1.0]]));
        assert!(!is_closed(&[[1.0, 1.0], [2.0, 2.0]]));
        assert!(is_closed(&[[1.0, 1.0], [2.0, 2.0], [1.0, 1.0]]));
    }

    #[test]
    fn path_swaps_coordinate_order() {
        let geometry = Geometry::LineString(vec![[-118.3, 34.0], [-118.2, 34.1]]);
        assert_eq!(
            geometry.path().expect("line has path"),
            vec![latlon!(34.0, -118.3), latlon!(34.1, -118.2)]
        );

        assert_eq!(Geometry::Point([1.0, 2.0]).path(), None);
    }

    #[test]
    fn position_order() {
        let point = latlon!(34.05, -118.25);
        assert_eq!(to_position(&point), [-118.25, 34.05]);
        assert_eq!(to_geo_point(&[-118.25, 34.05]), point);
    }
}
