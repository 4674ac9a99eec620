//! Final report of a finished run.

use invasion_types::AlienId;
use serde::Serialize;

use crate::observer::CityDestroyed;

/// What a finished run reports.
///
/// Serializes to JSON for `--report`. Alien ids serialize as their 0-based
/// index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationSummary {
    /// Aliens that landed.
    pub aliens: u32,
    /// Move allowance each alien started with.
    pub max_moves: u32,
    /// Rounds executed.
    pub rounds: u64,
    /// Moves made by all aliens together.
    pub total_moves: u64,
    /// Every destroyed city, in the order it fell.
    pub destroyed: Vec<CityDestroyed>,
    /// Aliens still alive at the end, by id.
    pub survivors: Vec<AlienId>,
    /// Survivors that stopped early because their city had no roads left.
    pub stranded: Vec<AlienId>,
    /// Cities still standing.
    pub cities_remaining: usize,
    /// Roads still standing.
    pub roads_remaining: usize,
}

impl SimulationSummary {
    /// Number of aliens killed in the fighting.
    pub fn aliens_killed(&self) -> usize {
        self.destroyed.iter().map(|event| event.aliens.len()).sum()
    }

    /// Number of cities destroyed.
    pub fn cities_destroyed(&self) -> usize {
        self.destroyed.len()
    }
}
