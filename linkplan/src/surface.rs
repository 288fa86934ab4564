use crate::C;
use geo::Coord;
use rfgeo::Projection;
use std::fmt::Debug;

/// Link line styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineColor {
    /// A link without its Fresnel zone shown.
    Idle,
    /// The link whose Fresnel zone is shown.
    Active,
}

impl LineColor {
    /// CSS-style hex color.
    pub fn hex(self) -> &'static str {
        match self {
            LineColor::Idle => "#3388ff",
            LineColor::Active => "#ff3333",
        }
    }
}

/// The map widget the planner draws on.
///
/// Implementors also provide the map's projection, which the planner
/// needs to build Fresnel zone ellipses that look right on screen.
pub trait MapSurface: Projection<C> {
    /// Identifies a drawn layer.
    type Handle: Clone + Debug;

    /// Places a tower marker.
    fn place_marker(&mut self, position: Coord<C>, label: &str) -> Self::Handle;

    /// Highlights, or stops highlighting, a marker picked for pairing.
    fn set_marker_selected(&mut self, marker: &Self::Handle, selected: bool);

    /// Draws a straight line between two positions, in
    /// [`LineColor::Idle`].
    fn draw_polyline(&mut self, ends: [Coord<C>; 2]) -> Self::Handle;

    fn set_line_color(&mut self, line: &Self::Handle, color: LineColor);

    /// Draws a filled polygon; the ring is implicitly closed.
    fn draw_polygon(&mut self, points: &[Coord<C>]) -> Self::Handle;

    /// Removes any layer previously returned by this surface.
    fn remove_layer(&mut self, layer: Self::Handle);
}
