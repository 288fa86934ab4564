use crate::constants::{MERCATOR_MAX_LAT, MERCATOR_RADIUS_M};
use geo::{Coord, CoordFloat};
use num_traits::{AsPrimitive, FloatConst};

/// A map projection between geographic coordinates and a planar
/// space whose `y` axis grows northward.
pub trait Projection<T: CoordFloat> {
    /// Projects a geographic `(lon, lat)` coordinate onto the plane.
    fn project(&self, coord: Coord<T>) -> Coord<T>;

    /// Inverse of [`Projection::project`].
    fn unproject(&self, point: Coord<T>) -> Coord<T>;

    /// Returns how many plane units one ground meter spans near
    /// `at`.
    fn plane_units_per_meter(&self, at: Coord<T>) -> T;
}

/// Spherical (web) mercator, EPSG:3857, in meters.
///
/// Latitudes beyond ±[`MERCATOR_MAX_LAT`] are clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebMercator;

fn clamp_lat<T>(lat: T) -> T
where
    T: CoordFloat + 'static,
    f64: AsPrimitive<T>,
{
    let max: T = MERCATOR_MAX_LAT.as_();
    lat.max(-max).min(max)
}

impl<T> Projection<T> for WebMercator
where
    T: CoordFloat + FloatConst + 'static,
    f64: AsPrimitive<T>,
{
    fn project(&self, Coord { x, y }: Coord<T>) -> Coord<T> {
        let r: T = MERCATOR_RADIUS_M.as_();
        let two = T::one() + T::one();
        let lat = clamp_lat(y).to_radians();
        Coord {
            x: r * x.to_radians(),
            y: r * (T::FRAC_PI_4() + lat / two).tan().ln(),
        }
    }

    fn unproject(&self, Coord { x, y }: Coord<T>) -> Coord<T> {
        let r: T = MERCATOR_RADIUS_M.as_();
        let two = T::one() + T::one();
        Coord {
            x: (x / r).to_degrees(),
            y: (two * (y / r).exp().atan() - T::FRAC_PI_2()).to_degrees(),
        }
    }

    fn plane_units_per_meter(&self, at: Coord<T>) -> T {
        T::one() / clamp_lat(at.y).to_radians().cos()
    }
}

#[cfg(test)]
mod tests {
    use super::{Projection, WebMercator};
    use approx::assert_relative_eq;
    use geo::{coord, Coord};

    #[test]
    fn test_origin() {
        let p = WebMercator.project(coord! { x: 0.0, y: 0.0 });
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_roundtrip() {
        let c = coord! { x: -71.30325, y: 44.2705 };
        let back = WebMercator.unproject(WebMercator.project(c));
        assert_relative_eq!(back.x, c.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, c.y, epsilon = 1e-9);
    }

    #[test]
    fn test_north_is_up() {
        let south = WebMercator.project(coord! { x: 10.0, y: 10.0 });
        let north = WebMercator.project(coord! { x: 10.0, y: 20.0 });
        assert!(north.y > south.y);
    }

    #[test]
    fn test_scale() {
        let equator: f64 = WebMercator.plane_units_per_meter(coord! { x: 0.0, y: 0.0 });
        let sixty: f64 = WebMercator.plane_units_per_meter(coord! { x: 0.0, y: 60.0 });
        assert_relative_eq!(equator, 1.0);
        assert_relative_eq!(sixty, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_clamps_poles() {
        let pole: Coord<f64> = WebMercator.project(coord! { x: 0.0, y: 90.0 });
        assert!(pole.y.is_finite());
    }
}
