//! Conversion of native SDK shapes into feature geometries.
//!
//! Every conversion reads the current state of the shape through the [`NativeShape`] accessors and produces a new
//! [`Geometry`]. Coordinates are swapped from the SDK's latitude-first order into `[longitude, latitude]` and are
//! not rounded or clamped.

use geodraw_types::geo::impls::GeoPoint2d;
use geodraw_types::geo::{Datum, GeoPoint, LatLngBounds, NewGeoPoint};
use geodraw_types::geometry::{to_geo_point, to_position};
use geodraw_types::{Geometry, Position, Ring, ShapeKind};

/// Default number of segments a circle is approximated with.
pub const DEFAULT_CIRCLE_STEPS: u32 = 64;

// Degrees.
const RING_CLOSING_TOLERANCE: f64 = 1e-9;

/// Read access to the geometry of a shape owned by a map SDK.
///
/// A shape only implements accessors relevant to its kind; the rest return `None`.
pub trait NativeShape {
    /// Vertices of a polyline or polygon.
    fn path(&self) -> Option<Vec<GeoPoint2d>> {
        None
    }

    /// Center of a circle.
    fn center(&self) -> Option<GeoPoint2d> {
        None
    }

    /// Radius of a circle in meters.
    fn radius(&self) -> Option<f64> {
        None
    }

    /// Bounds of a rectangle.
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }

    /// Position of a marker.
    fn position(&self) -> Option<GeoPoint2d> {
        None
    }
}

/// Parameters of shape normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeOptions {
    /// Number of segments a circle is approximated with. The resulting ring has `circle_steps + 1` positions.
    pub circle_steps: u32,
    /// If set, polygon rings get the first vertex repeated at the end. SDK polygons are implicitly closed, so by
    /// default the ring is emitted as the SDK path is.
    pub close_polygon_rings: bool,
    /// Datum used for circle approximation.
    pub datum: Datum,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            circle_steps: DEFAULT_CIRCLE_STEPS,
            close_polygon_rings: false,
            datum: Datum::WGS84,
        }
    }
}

/// Converts the current state of the shape into a geometry.
///
/// Returns `None` if the shape does not provide the data its kind needs, or if the options cannot produce a
/// geometry (zero circle steps).
pub fn normalize(
    shape: &(impl NativeShape + ?Sized),
    kind: ShapeKind,
    options: &NormalizeOptions,
) -> Option<Geometry> {
    match kind {
        ShapeKind::Point => Some(Geometry::Point(to_position(&shape.position()?))),
        ShapeKind::Line => Some(Geometry::LineString(path_positions(shape)?)),
        ShapeKind::Polygon => {
            let mut geometry = Geometry::Polygon(vec![path_positions(shape)?]);
            if options.close_polygon_rings {
                geometry.close_rings();
            }

            Some(geometry)
        }
        ShapeKind::Circle => Some(Geometry::Polygon(vec![circle_ring(
            &shape.center()?,
            shape.radius()?,
            options.circle_steps,
            &options.datum,
        )?])),
        ShapeKind::Rectangle => Some(Geometry::Polygon(vec![rectangle_ring(&shape.bounds()?)])),
    }
}

fn path_positions(shape: &(impl NativeShape + ?Sized)) -> Option<Ring> {
    Some(shape.path()?.iter().map(to_position).collect())
}

/// Approximates a circle with a ring of `steps + 1` positions.
///
/// Position `i` lies at the great-circle distance `radius` (meters) from the center at the heading of
/// `i * 360 / steps` degrees, so the last position revisits the starting heading and closes the ring.
pub fn circle_ring(
    center: &GeoPoint2d,
    radius: f64,
    steps: u32,
    datum: &Datum,
) -> Option<Ring> {
    if steps == 0 {
        return None;
    }

    (0..=steps)
        .map(|i| {
            let heading = f64::from(i) * 360.0 / f64::from(steps);
            center
                .offset::<GeoPoint2d>(radius, heading, datum)
                .map(|p| to_position(&p))
        })
        .collect()
}

/// Ring of a rectangle: top-left, top-right, bottom-right, bottom-left and top-left again.
pub fn rectangle_ring(bounds: &LatLngBounds) -> Ring {
    let ne = bounds.north_east();
    let sw = bounds.south_west();

    vec![
        [sw.lon(), ne.lat()],
        [ne.lon(), ne.lat()],
        [ne.lon(), sw.lat()],
        [sw.lon(), sw.lat()],
        [sw.lon(), ne.lat()],
    ]
}

/// Owned copy of the accessor values of a native shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeSnapshot {
    /// Marker at a position.
    Marker {
        /// Position of the marker.
        position: GeoPoint2d,
    },
    /// Open polyline.
    Polyline {
        /// Vertices.
        path: Vec<GeoPoint2d>,
    },
    /// Implicitly closed polygon.
    Polygon {
        /// Vertices, without the closing one.
        path: Vec<GeoPoint2d>,
    },
    /// Circle.
    Circle {
        /// Center of the circle.
        center: GeoPoint2d,
        /// Radius in meters.
        radius: f64,
    },
    /// Rectangle.
    Rectangle {
        /// Bounds of the rectangle.
        bounds: LatLngBounds,
    },
}

impl ShapeSnapshot {
    /// Kind of the shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeSnapshot::Marker { .. } => ShapeKind::Point,
            ShapeSnapshot::Polyline { .. } => ShapeKind::Line,
            ShapeSnapshot::Polygon { .. } => ShapeKind::Polygon,
            ShapeSnapshot::Circle { .. } => ShapeKind::Circle,
            ShapeSnapshot::Rectangle { .. } => ShapeKind::Rectangle,
        }
    }

    /// Derives the native representation of a shape of the given kind from its geometry.
    ///
    /// A circle is derived from its ring approximation (see [`circle_from_ring`]) on the WGS84 sphere.
    pub fn from_geometry(kind: ShapeKind, geometry: &Geometry) -> Option<Self> {
        match (kind, geometry) {
            (ShapeKind::Point, Geometry::Point(position)) => Some(ShapeSnapshot::Marker {
                position: to_geo_point(position),
            }),
            (ShapeKind::Line, Geometry::LineString(_)) => Some(ShapeSnapshot::Polyline {
                path: geometry.path()?,
            }),
            (ShapeKind::Polygon, Geometry::Polygon(_)) => Some(ShapeSnapshot::Polygon {
                path: geometry.path()?,
            }),
            (ShapeKind::Rectangle, Geometry::Polygon(_)) => Some(ShapeSnapshot::Rectangle {
                bounds: LatLngBounds::from_points(&geometry.path()?)?,
            }),
            (ShapeKind::Circle, Geometry::Polygon(_)) => {
                let (center, radius) = circle_from_ring(geometry.exterior()?, &Datum::WGS84)?;
                Some(ShapeSnapshot::Circle { center, radius })
            }
            _ => None,
        }
    }
}

impl NativeShape for ShapeSnapshot {
    fn path(&self) -> Option<Vec<GeoPoint2d>> {
        match self {
            ShapeSnapshot::Polyline { path } | ShapeSnapshot::Polygon { path } => Some(path.clone()),
            _ => None,
        }
    }

    fn center(&self) -> Option<GeoPoint2d> {
        match self {
            ShapeSnapshot::Circle { center, .. } => Some(*center),
            _ => None,
        }
    }

    fn radius(&self) -> Option<f64> {
        match self {
            ShapeSnapshot::Circle { radius, .. } => Some(*radius),
            _ => None,
        }
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        match self {
            ShapeSnapshot::Rectangle { bounds } => Some(*bounds),
            _ => None,
        }
    }

    fn position(&self) -> Option<GeoPoint2d> {
        match self {
            ShapeSnapshot::Marker { position } => Some(*position),
            _ => None,
        }
    }
}

/// Restores the center and radius of a circle from its ring approximation made by [`circle_ring`].
///
/// The center is the direction of the sum of the unit vectors of the ring positions (the closing position is not
/// counted), which points exactly at the center for evenly spaced positions. The radius is the distance from the
/// center to the first position. Returns `None` for rings with less than 3 distinct positions or positions
/// spread evenly around the whole sphere.
pub fn circle_from_ring(ring: &[Position], datum: &Datum) -> Option<(GeoPoint2d, f64)> {
    let points = match (ring.first(), ring.last()) {
        (Some(first), Some(last))
            if ring.len() > 1
                && (first[0] - last[0]).abs() < RING_CLOSING_TOLERANCE
                && (first[1] - last[1]).abs() < RING_CLOSING_TOLERANCE =>
        {
            &ring[..ring.len() - 1]
        }
        _ => ring,
    };

    if points.len() < 3 {
        return None;
    }

    let (x, y, z) = points
        .iter()
        .map(to_geo_point)
        .fold((0.0, 0.0, 0.0), |(x, y, z), p| {
            let (lat, lon) = (p.lat_rad(), p.lon_rad());
            (
                x + lat.cos() * lon.cos(),
                y + lat.cos() * lon.sin(),
                z + lat.sin(),
            )
        });

    let horizontal = x.hypot(y);
    if horizontal.hypot(z) < f64::EPSILON {
        return None;
    }

    let center = GeoPoint2d::latlon(z.atan2(horizontal).to_degrees(), y.atan2(x).to_degrees());
    let radius = center.distance(&to_geo_point(&points[0]), datum)?;

    Some((center, radius))
}

/// Creates a snapshot of a polyline or polygon path given in `(lat, lon)` pairs.
pub fn path_from_latlon(points: &[(f64, f64)]) -> Vec<GeoPoint2d> {
    points
        .iter()
        .map(|(lat, lon)| GeoPoint2d::latlon(*lat, *lon))
        .collect()
}
