use crate::C;
use geo::Coord;
use std::fmt;

/// Unique, never reused, tower identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TowerId(pub(crate) u32);

impl TowerId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for TowerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tower #{}", self.0)
    }
}

/// A radio tower placed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Tower {
    pub id: TowerId,

    /// Display label, never empty.
    pub name: String,

    /// Operating frequency (GHz, always positive).
    pub frequency_ghz: C,

    /// Location, `x` is longitude and `y` is latitude.
    pub position: Coord<C>,
}
