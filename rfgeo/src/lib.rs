//! # RF Geometry
//!
//! `rfgeo` provides the stateless math behind point-to-point link
//! planning: great-circle distance and bearing, wavelength and
//! Fresnel zone radii, and the planar ellipse used to draw a link's
//! first Fresnel zone on a projected map.
//!
//! All coordinates are [`geo::Coord`]s in decimal degrees, with `x`
//! holding longitude and `y` holding latitude.

pub mod constants;
mod ellipse;
pub mod fresnel;
mod haversine;
mod projection;

pub use crate::{
    ellipse::{ellipse_polygon, Ellipse, EllipseIter, DEFAULT_SEGMENTS, MIN_SEGMENTS},
    fresnel::{fresnel_radius_m, wavelength_m, FresnelZone, FresnelZoneIter},
    haversine::{bearing_deg, distance_km, intermediate, midpoint},
    projection::{Projection, WebMercator},
};
pub use geo;
