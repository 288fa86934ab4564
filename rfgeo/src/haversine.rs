//! Great-circle routines on a spherical earth of radius
//! [`EARTH_RADIUS_KM`].

use crate::constants::EARTH_RADIUS_KM;
use geo::{Coord, CoordFloat};
use num_traits::AsPrimitive;

/// Returns the haversine great-circle distance, in kilometers, from
/// `a` to `b`.
pub fn distance_km<T>(a: Coord<T>, b: Coord<T>) -> T
where
    T: CoordFloat + 'static,
    f64: AsPrimitive<T>,
{
    let one = T::one();
    let two = one + one;

    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();

    let h = (d_lat / two).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / two).sin().powi(2);
    let c = two * h.sqrt().atan2((one - h).sqrt());

    EARTH_RADIUS_KM.as_() * c
}

/// Returns the initial great-circle bearing from `a` towards `b` in
/// degrees clockwise from north, normalized to `[0, 360)`.
pub fn bearing_deg<T>(a: Coord<T>, b: Coord<T>) -> T
where
    T: CoordFloat + 'static,
    f64: AsPrimitive<T>,
{
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let d_lon = (b.x - a.x).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    let full_turn: T = 360.0_f64.as_();
    let bearing = y.atan2(x).to_degrees();
    let bearing = if bearing < T::zero() {
        bearing + full_turn
    } else {
        bearing
    };
    // -0.0 + 360 and similar tiny negatives round up to a full turn.
    if bearing >= full_turn {
        T::zero()
    } else {
        bearing
    }
}

/// Returns the point `fraction` of the way along the great circle
/// from `a` to `b`.
///
/// `fraction` is expected to be in `[0, 1]`; `0` returns `a` and `1`
/// returns `b`.
#[allow(clippy::many_single_char_names)]
pub fn intermediate<T>(a: Coord<T>, b: Coord<T>, fraction: T) -> Coord<T>
where
    T: CoordFloat,
{
    let one = T::one();
    let two = one + one;

    let lat1 = a.y.to_radians();
    let lon1 = a.x.to_radians();
    let lat2 = b.y.to_radians();
    let lon2 = b.x.to_radians();

    let (lat1_sin, lat1_cos) = lat1.sin_cos();
    let (lat2_sin, lat2_cos) = lat2.sin_cos();
    let (lon1_sin, lon1_cos) = lon1.sin_cos();
    let (lon2_sin, lon2_cos) = lon2.sin_cos();

    let k = (((lat1 - lat2) / two).sin().powi(2)
        + lat1_cos * lat2_cos * ((lon1 - lon2) / two).sin().powi(2))
    .sqrt();
    let d = two * k.asin();

    if d == T::zero() {
        return a;
    }

    let f_a = ((one - fraction) * d).sin() / d.sin();
    let f_b = (fraction * d).sin() / d.sin();

    let x = f_a * lat1_cos * lon1_cos + f_b * lat2_cos * lon2_cos;
    let y = f_a * lat1_cos * lon1_sin + f_b * lat2_cos * lon2_sin;
    let z = f_a * lat1_sin + f_b * lat2_sin;

    let lat = z.atan2(x.hypot(y));
    let lon = y.atan2(x);

    Coord {
        x: lon.to_degrees(),
        y: lat.to_degrees(),
    }
}

/// Returns the great-circle midpoint between `a` and `b`.
pub fn midpoint<T>(a: Coord<T>, b: Coord<T>) -> Coord<T>
where
    T: CoordFloat,
{
    let half = T::one() / (T::one() + T::one());
    intermediate(a, b, half)
}
