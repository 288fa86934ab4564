use crate::constants::{HZ_PER_GHZ, M_PER_KM, SPEED_OF_LIGHT};
use num_traits::{AsPrimitive, Float};
use std::ops::Range;

/// Returns the wavelength, in meters, of a signal at `f_ghz`.
///
/// The result is infinite for `f_ghz == 0`; callers are expected to
/// reject non-positive frequencies first.
pub fn wavelength_m<T>(f_ghz: T) -> T
where
    T: Float + 'static,
    f64: AsPrimitive<T>,
{
    SPEED_OF_LIGHT.as_() / (f_ghz * HZ_PER_GHZ.as_())
}

/// Returns the first Fresnel zone radius, in meters, at a point
/// `d1_km` from one end of a path and `d2_km` from the other.
///
/// A zero-length path has a zero radius.
pub fn fresnel_radius_m<T>(wavelength_m: T, d1_km: T, d2_km: T) -> T
where
    T: Float + 'static,
    f64: AsPrimitive<T>,
{
    let d1_m = d1_km * M_PER_KM.as_();
    let d2_m = d2_km * M_PER_KM.as_();
    let total_m = d1_m + d2_m;
    if total_m == T::zero() {
        return T::zero();
    }
    ((wavelength_m * d1_m * d2_m) / total_m).sqrt()
}

/// Represents the nth fresnel zone of a radio link.
#[derive(Debug, Clone, Copy)]
pub struct FresnelZone<T> {
    /// Which fresnel zone we're interested in.
    zone: u8,
    wavelength_m: T,
    distance_m: T,
}

impl<T> FresnelZone<T> {
    /// Returns a new FresnelZone object for a path of `distance_m`
    /// meters carrying a signal at `f_ghz`.
    pub fn new(zone: u8, f_ghz: T, distance_m: T) -> Self
    where
        T: Float + 'static,
        f64: AsPrimitive<T>,
    {
        Self {
            zone,
            wavelength_m: wavelength_m(f_ghz),
            distance_m,
        }
    }

    pub fn wavelength_m(&self) -> T
    where
        T: Copy,
    {
        self.wavelength_m
    }

    /// Returns a new FresnelZoneIter of length `len`.
    pub fn iter(&self, len: usize) -> FresnelZoneIter<T>
    where
        T: Copy + 'static,
        u8: AsPrimitive<T>,
    {
        FresnelZoneIter {
            zone: self.zone.as_(),
            wavelength_m: self.wavelength_m,
            distance_m: self.distance_m,
            range: 0..len,
        }
    }
}

/// Yields `(distance along path, zone radius)` pairs, in meters, at
/// evenly spaced points from one end of the path to the other.
#[derive(Debug, Clone)]
pub struct FresnelZoneIter<T> {
    zone: T,
    wavelength_m: T,
    range: Range<usize>,
    distance_m: T,
}

impl<T> Iterator for FresnelZoneIter<T>
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
    type Item = (T, T);

    #[inline]
    fn next(&mut self) -> Option<(T, T)> {
        let steps = (self.range.end.max(2) - 1).as_();
        self.range.next().map(|n| {
            let d1 = self.distance_m * (n.as_() / steps);
            let d2 = self.distance_m - d1;
            if self.distance_m == T::zero() {
                return (d1, T::zero());
            }
            let radius = (self.zone * self.wavelength_m * d1 * d2 / self.distance_m).sqrt();
            (d1, radius)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<T> ExactSizeIterator for FresnelZoneIter<T>
where
    T: Float + 'static,
    usize: AsPrimitive<T>,
{
}

#[cfg(test)]
mod tests {
    use super::{fresnel_radius_m, wavelength_m, FresnelZone};
    use approx::assert_relative_eq;

    #[test]
    fn test_wavelength() {
        assert_relative_eq!(wavelength_m(5.0), 0.06, epsilon = 1e-12);
        assert_relative_eq!(wavelength_m(2.4), 3e8 / 2.4e9, epsilon = 1e-12);
    }

    #[test]
    fn test_wavelength_of_zero_is_infinite() {
        assert!(wavelength_m(0.0_f64).is_infinite());
    }

    #[test]
    fn test_midpoint_radius_of_10km_link() {
        let radius = fresnel_radius_m(0.06, 5.0, 5.0);
        assert_relative_eq!(radius, 150.0_f64.sqrt(), epsilon = 1e-9);
        assert_relative_eq!(radius, 12.247_448_713_915_89, epsilon = 1e-9);
    }

    #[test]
    fn test_radius_of_zero_length_path() {
        assert_eq!(fresnel_radius_m(0.06, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_zero_len_fresnel_zone_iter() {
        let mut iter = FresnelZone::new(1, 1.0, 10e3).iter(0);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_1st_fresnel_zone() {
        let iter = FresnelZone::new(1, 0.9, 1e3).iter(3);
        assert_eq!(iter.len(), 3);
        let radii: Vec<f64> = iter.map(|(_, r)| r).collect();
        assert_relative_eq!(radii[0], 0.0);
        assert_relative_eq!(radii[1], 9.128_709_291_752_768, epsilon = 1e-9);
        assert_relative_eq!(radii[2], 0.0);
    }

    #[test]
    fn test_2nd_fresnel_zone() {
        let radii: Vec<f64> = FresnelZone::new(2, 0.9, 1e3)
            .iter(3)
            .map(|(_, r)| r)
            .collect();
        assert_relative_eq!(radii[1], 12.909_944_487_358_056, epsilon = 1e-9);
    }

    #[test]
    fn test_3rd_fresnel_zone() {
        let radii: Vec<f64> = FresnelZone::new(3, 0.9, 1e3)
            .iter(3)
            .map(|(_, r)| r)
            .collect();
        assert_relative_eq!(radii[1], 15.811_388_300_841_896, epsilon = 1e-9);
    }

    #[test]
    fn test_zone_iter_matches_midpoint_radius() {
        let zone = FresnelZone::new(1, 5.0, 10e3);
        let (d1, radius) = zone.iter(5).nth(2).unwrap();
        assert_relative_eq!(d1, 5e3);
        assert_relative_eq!(
            radius,
            fresnel_radius_m(zone.wavelength_m(), 5.0, 5.0),
            epsilon = 1e-9
        );
    }
}
