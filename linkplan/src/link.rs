use crate::{TowerId, C};
use std::fmt;

/// Unique, never reused, link identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub(crate) u32);

impl LinkId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for LinkId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link #{}", self.0)
    }
}

/// A point-to-point link between two towers sharing a frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: LinkId,

    pub a: TowerId,

    pub b: TowerId,

    /// Frequency both towers were on when the link was created (GHz).
    pub frequency_ghz: C,

    /// Great-circle length, computed once at creation (km).
    pub distance_km: C,
}

impl Link {
    /// Returns true if either end of this link is `tower`.
    pub fn touches(&self, tower: TowerId) -> bool {
        self.a == tower || self.b == tower
    }

    /// Returns true if this link joins `x` and `y`, in either order.
    pub fn joins(&self, x: TowerId, y: TowerId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    /// Returns the end opposite `tower`, if `tower` is an end at all.
    pub fn other_end(&self, tower: TowerId) -> Option<TowerId> {
        if self.a == tower {
            Some(self.b)
        } else if self.b == tower {
            Some(self.a)
        } else {
            None
        }
    }
}
