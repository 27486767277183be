use num_traits::{Float, NumCast};

use crate::geo::datum::Datum;

/// Point on the surface of the Earth given by latitude and longitude in degrees.
///
/// Distances and headings are calculated on a sphere with the radius of the datum's semi-major axis.
pub trait GeoPoint {
    /// Numeric type of the coordinates.
    type Num: Float;

    /// Latitude in degrees.
    fn lat(&self) -> Self::Num;
    /// Longitude in degrees.
    fn lon(&self) -> Self::Num;

    /// Latitude in radians.
    fn lat_rad(&self) -> Self::Num {
        self.lat().to_radians()
    }

    /// Longitude in radians.
    fn lon_rad(&self) -> Self::Num {
        self.lon().to_radians()
    }

    /// Great-circle distance to the `other` point in meters.
    fn distance(&self, other: &impl GeoPoint<Num = Self::Num>, datum: &Datum) -> Option<Self::Num> {
        let two: Self::Num = NumCast::from(2.0)?;
        let radius: Self::Num = NumCast::from(datum.semimajor())?;

        let d_lat = other.lat_rad() - self.lat_rad();
        let d_lon = other.lon_rad() - self.lon_rad();
        let hav = (d_lat / two).sin().powi(2)
            + self.lat_rad().cos() * other.lat_rad().cos() * (d_lon / two).sin().powi(2);

        Some(two * hav.sqrt().asin() * radius)
    }

    /// Initial heading (bearing) from this point to the `other` one, in degrees clockwise from the north, in
    /// the range `[-180, 180)`.
    fn heading(&self, other: &impl GeoPoint<Num = Self::Num>) -> Option<Self::Num> {
        let d_lon = other.lon_rad() - self.lon_rad();
        let y = d_lon.sin() * other.lat_rad().cos();
        let x = self.lat_rad().cos() * other.lat_rad().sin()
            - self.lat_rad().sin() * other.lat_rad().cos() * d_lon.cos();

        wrap_longitude(y.atan2(x).to_degrees())
    }

    /// Point at the given `distance` (meters) from this one, moving along the great circle with the initial
    /// `heading` (degrees clockwise from the north).
    ///
    /// Longitude of the result is wrapped into `[-180, 180)`.
    fn offset<P>(&self, distance: Self::Num, heading: Self::Num, datum: &Datum) -> Option<P>
    where
        P: NewGeoPoint<Self::Num>,
    {
        let radius: Self::Num = NumCast::from(datum.semimajor())?;
        let angular = distance / radius;
        let heading = heading.to_radians();
        let lat = self.lat_rad();

        let sin_lat = angular.cos() * lat.sin() + angular.sin() * lat.cos() * heading.cos();
        let d_lon = (angular.sin() * lat.cos() * heading.sin())
            .atan2(angular.cos() - lat.sin() * sin_lat);

        let lon = wrap_longitude((self.lon_rad() + d_lon).to_degrees())?;
        Some(P::latlon(sin_lat.asin().to_degrees(), lon))
    }
}

/// Geographic point that can be constructed from coordinates.
pub trait NewGeoPoint<N = f64>: GeoPoint<Num = N> + Sized {
    /// Creates a point from latitude and longitude in degrees.
    fn latlon(lat: N, lon: N) -> Self;

    /// Creates a point from longitude and latitude in degrees.
    fn lonlat(lon: N, lat: N) -> Self {
        Self::latlon(lat, lon)
    }
}

fn wrap_longitude<N: Float>(lon: N) -> Option<N> {
    let half_turn: N = NumCast::from(180.0)?;
    let turn: N = NumCast::from(360.0)?;

    if lon >= -half_turn && lon < half_turn {
        return Some(lon);
    }

    let shifted = (lon + half_turn) % turn;
    let shifted = if shifted < N::zero() {
        shifted + turn
    } else {
        shifted
    };

    Some(shifted - half_turn)
}
