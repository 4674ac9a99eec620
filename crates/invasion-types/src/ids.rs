//! Identifier for the invading aliens.
//!
//! Aliens are numbered densely from zero, one per requested invader, so the
//! engine can keep per-alien state in plain vectors. People count from one,
//! so [`AlienId`] displays its 1-based number.

use serde::{Deserialize, Serialize};

/// Identity of a single alien: a zero-based index into the invading force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlienId(pub u32);

impl AlienId {
    /// Create an identifier from a zero-based index.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the zero-based index.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Return the 1-based number shown to humans.
    pub fn number(self) -> u64 {
        // Widened so `u32::MAX` still has a successor.
        u64::from(self.0).saturating_add(1)
    }
}

impl core::fmt::Display for AlienId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl From<u32> for AlienId {
    fn from(index: u32) -> Self {
        Self(index)
    }
}
