//! Conversions between [`Geometry`] and [`geo_types`] geometries.

use geo_types::{Coord, CoordFloat, LineString};

use crate::error::GeodrawTypesError;
use crate::geo::{GeoPoint, NewGeoPoint};
use crate::geometry::{Geometry, Position, Ring};

impl<T: CoordFloat> GeoPoint for geo_types::Point<T> {
    type Num = T;

    fn lat(&self) -> Self::Num {
        self.y()
    }

    fn lon(&self) -> Self::Num {
        self.x()
    }
}

impl<T: CoordFloat> NewGeoPoint<T> for geo_types::Point<T> {
    fn latlon(lat: T, lon: T) -> Self {
        geo_types::Point::new(lon, lat)
    }
}

fn to_line_string(positions: &[Position]) -> LineString<f64> {
    positions
        .iter()
        .map(|[lon, lat]| Coord { x: *lon, y: *lat })
        .collect()
}

fn to_ring(line: &LineString<f64>) -> Ring {
    line.coords().map(|c| [c.x, c.y]).collect()
}

impl From<&Geometry> for geo_types::Geometry<f64> {
    fn from(value: &Geometry) -> Self {
        match value {
            Geometry::Point([lon, lat]) => geo_types::Point::new(*lon, *lat).into(),
            Geometry::LineString(positions) => to_line_string(positions).into(),
            Geometry::Polygon(rings) => {
                let mut rings = rings.iter().map(|ring| to_line_string(ring));
                let exterior = rings.next().unwrap_or_else(|| LineString::new(vec![]));
                geo_types::Polygon::new(exterior, rings.collect()).into()
            }
        }
    }
}

impl TryFrom<&geo_types::Geometry<f64>> for Geometry {
    type Error = GeodrawTypesError;

    fn try_from(value: &geo_types::Geometry<f64>) -> Result<Self, Self::Error> {
        match value {
            geo_types::Geometry::Point(p) => Ok(Geometry::Point([p.x(), p.y()])),
            geo_types::Geometry::LineString(line) => Ok(Geometry::LineString(to_ring(line))),
            geo_types::Geometry::Polygon(polygon) => {
                let mut rings = vec![to_ring(polygon.exterior())];
                rings.extend(polygon.interiors().iter().map(to_ring));
                Ok(Geometry::Polygon(rings))
            }
            other => Err(GeodrawTypesError::Conversion(format!(
                "unsupported geometry type: {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn point_coordinate_order() {
        let point: geo_types::Point<f64> = NewGeoPoint::latlon(34.05, -118.25);
        assert_eq!(point.x(), -118.25);
        assert_eq!(point.lat(), 34.05);

        let geometry = Geometry::Point([-118.25, 34.05]);
        assert_eq!(
            geo_types::Geometry::from(&geometry),
            geo_types::Geometry::Point(point)
        );
    }

    #[test]
    fn polygon_conversion_closes_ring() {
        let geometry = Geometry::Polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]]);
        let converted = geo_types::Geometry::from(&geometry);
        let back = Geometry::try_from(&converted).expect("polygon converts back");

        assert_eq!(
            back,
            Geometry::Polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]])
        );
    }

    #[test]
    fn unsupported_geometry() {
        let multi = geo_types::Geometry::MultiPoint(geo_types::MultiPoint::new(vec![]));
        assert_matches!(
            Geometry::try_from(&multi),
            Err(GeodrawTypesError::Conversion(_))
        );
    }
}
