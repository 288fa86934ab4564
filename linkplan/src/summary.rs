use crate::{Link, LinkId, Tower, C};
use geo::Coord;
use rfgeo::{bearing_deg, fresnel_radius_m, midpoint, wavelength_m, Ellipse};

/// Link details shown alongside its Fresnel zone.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSummary {
    pub link: LinkId,

    pub a_name: String,

    pub b_name: String,

    /// Great-circle length (km).
    pub distance_km: C,

    /// Link frequency (GHz).
    pub frequency_ghz: C,

    /// Wavelength at `frequency_ghz` (m).
    pub wavelength_m: C,

    /// First Fresnel zone radius at the middle of the path (m).
    pub fresnel_radius_m: C,

    /// Initial bearing from `a` to `b` (degrees).
    pub bearing_deg: C,

    /// Great-circle midpoint of the path.
    pub midpoint: Coord<C>,
}

impl LinkSummary {
    pub fn new(link: &Link, a: &Tower, b: &Tower) -> Self {
        let wavelength = wavelength_m(link.frequency_ghz);
        let half_km = link.distance_km / 2.0;
        Self {
            link: link.id,
            a_name: a.name.clone(),
            b_name: b.name.clone(),
            distance_km: link.distance_km,
            frequency_ghz: link.frequency_ghz,
            wavelength_m: wavelength,
            fresnel_radius_m: fresnel_radius_m(wavelength, half_km, half_km),
            bearing_deg: bearing_deg(a.position, b.position),
            midpoint: midpoint(a.position, b.position),
        }
    }

    /// The ellipse drawn for this link: as long as the link and as
    /// wide as the first Fresnel zone at its midpoint.
    pub fn zone_ellipse(&self) -> Ellipse<C> {
        Ellipse::new(
            self.midpoint,
            self.distance_km * 1e3 / 2.0,
            self.fresnel_radius_m,
            self.bearing_deg,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::LinkSummary;
    use crate::{Link, LinkId, Tower, TowerId};
    use approx::assert_relative_eq;
    use geo::coord;

    #[test]
    fn test_10km_link_on_5ghz() {
        let a = Tower {
            id: TowerId(1),
            name: "West".to_string(),
            frequency_ghz: 5.0,
            position: coord! { x: 0.0, y: 0.0 },
        };
        let b = Tower {
            id: TowerId(2),
            name: "East".to_string(),
            frequency_ghz: 5.0,
            position: coord! { x: 0.09, y: 0.0 },
        };
        let link = Link {
            id: LinkId(1),
            a: a.id,
            b: b.id,
            frequency_ghz: 5.0,
            distance_km: 10.0,
        };
        let summary = LinkSummary::new(&link, &a, &b);
        assert_relative_eq!(summary.wavelength_m, 0.06, epsilon = 1e-12);
        assert_relative_eq!(summary.fresnel_radius_m, 150.0_f64.sqrt(), epsilon = 1e-9);
        assert_relative_eq!(summary.bearing_deg, 90.0, epsilon = 1e-9);
        assert_relative_eq!(summary.midpoint.x, 0.045, epsilon = 1e-12);

        let ellipse = summary.zone_ellipse();
        assert_relative_eq!(ellipse.semi_major_m, 5000.0);
        assert_relative_eq!(ellipse.semi_minor_m, summary.fresnel_radius_m);
        assert_eq!(ellipse.segments, rfgeo::DEFAULT_SEGMENTS);
    }
}
