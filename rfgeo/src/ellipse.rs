//! Planar ellipse approximation used to draw a link's Fresnel zone.
//!
//! The ellipse is built in projected space rather than in degrees so
//! that it looks like an ellipse on the rendered map.

use crate::projection::Projection;
use geo::{Coord, CoordFloat, LineString, Polygon};
use num_traits::{AsPrimitive, FloatConst};
use std::ops::Range;

/// Number of polygon vertices used when none is specified.
pub const DEFAULT_SEGMENTS: usize = 64;

/// Fewest vertices that still enclose an area.
pub const MIN_SEGMENTS: usize = 3;

/// An ellipse on the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse<T: CoordFloat = f64> {
    /// Geographic center.
    pub center: Coord<T>,

    /// Half length of the major axis (meters).
    pub semi_major_m: T,

    /// Half length of the minor axis (meters).
    pub semi_minor_m: T,

    /// Direction of the major axis, degrees clockwise from north.
    pub bearing_deg: T,

    /// Number of vertices to generate.
    pub segments: usize,
}

impl<T: CoordFloat> Ellipse<T> {
    /// Returns an ellipse with [`DEFAULT_SEGMENTS`] vertices.
    pub fn new(center: Coord<T>, semi_major_m: T, semi_minor_m: T, bearing_deg: T) -> Self {
        Self {
            center,
            semi_major_m,
            semi_minor_m,
            bearing_deg,
            segments: DEFAULT_SEGMENTS,
        }
    }

    /// Number of polygon vertices (defaults to 64).
    #[must_use]
    pub fn segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    /// Returns an iterator over this ellipse's vertices, projected
    /// through `projection`.
    pub fn points<'a, P>(&self, projection: &'a P) -> EllipseIter<'a, T, P>
    where
        P: Projection<T>,
    {
        let scale = projection.plane_units_per_meter(self.center);
        let (rot_sin, rot_cos) = (-self.bearing_deg).to_radians().sin_cos();
        EllipseIter {
            projection,
            center: projection.project(self.center),
            major: self.semi_major_m * scale,
            minor: self.semi_minor_m * scale,
            rot_sin,
            rot_cos,
            range: 0..self.segments,
        }
    }
}

/// Returns `ellipse` as a closed polygon.
pub fn ellipse_polygon<T, P>(ellipse: &Ellipse<T>, projection: &P) -> Polygon<T>
where
    T: CoordFloat + FloatConst + 'static,
    P: Projection<T>,
    usize: AsPrimitive<T>,
{
    let exterior: LineString<T> = ellipse.points(projection).collect::<Vec<_>>().into();
    Polygon::new(exterior, vec![])
}

/// Yields the vertices of an [`Ellipse`] in counter-clockwise order,
/// starting on the minor axis.
pub struct EllipseIter<'a, T: CoordFloat, P> {
    projection: &'a P,
    /// Projected center.
    center: Coord<T>,
    /// Semi axes in plane units.
    major: T,
    minor: T,
    rot_sin: T,
    rot_cos: T,
    range: Range<usize>,
}

impl<'a, T: CoordFloat, P> Clone for EllipseIter<'a, T, P> {
    fn clone(&self) -> Self {
        Self {
            projection: self.projection,
            center: self.center,
            major: self.major,
            minor: self.minor,
            rot_sin: self.rot_sin,
            rot_cos: self.rot_cos,
            range: self.range.clone(),
        }
    }
}

impl<'a, T, P> Iterator for EllipseIter<'a, T, P>
where
    T: CoordFloat + FloatConst + 'static,
    P: Projection<T>,
    usize: AsPrimitive<T>,
{
    type Item = Coord<T>;

    fn next(&mut self) -> Option<Coord<T>> {
        let segments: T = self.range.end.as_();
        self.range.next().map(|n| {
            let theta = T::TAU() * n.as_() / segments;
            let (sin, cos) = theta.sin_cos();
            let x = self.minor * cos;
            let y = self.major * sin;
            let rotated = Coord {
                x: x * self.rot_cos - y * self.rot_sin,
                y: x * self.rot_sin + y * self.rot_cos,
            };
            self.projection.unproject(self.center + rotated)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<'a, T, P> ExactSizeIterator for EllipseIter<'a, T, P>
where
    T: CoordFloat + FloatConst + 'static,
    P: Projection<T>,
    usize: AsPrimitive<T>,
{
}
