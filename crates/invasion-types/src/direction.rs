//! Compass directions for roads between cities.
//!
//! A city has at most one outgoing road per direction. Names are the
//! lowercase words used by the map text format (`north`, `east`, `south`,
//! `west`); lookup by name is case-insensitive.

use serde::{Deserialize, Serialize};

/// One of the four compass directions a road can leave a city in.
///
/// The declaration order (north, east, south, west) is also the sort
/// order, which fixes the order roads are listed in within a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Road heading north.
    North,
    /// Road heading east.
    East,
    /// Road heading south.
    South,
    /// Road heading west.
    West,
}

impl Direction {
    /// Every direction, in sort order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Look up a direction by name, ignoring ASCII case.
    ///
    /// Returns `None` for anything other than `north`, `east`, `south` or
    /// `west`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.name().eq_ignore_ascii_case(name))
    }

    /// The lowercase name used in the map text format.
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
