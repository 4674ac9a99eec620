//! One-shot invasion pipeline: read a map, run the invasion, write what is
//! left.
//!
//! [`run_invasion`] works on any reader and writer, so the CLI can hand it
//! files or standard streams and tests can hand it byte slices.

use std::io::{self, BufRead, Write};

use invasion_world::{CityMap, CodecError, read_map, write_map};
use rand::Rng;
use tracing::info;

use crate::config::InvasionConfig;
use crate::observer::InvasionObserver;
use crate::scenario::{DEFAULT_MAX_MOVES, Scenario, ScenarioError};
use crate::summary::SimulationSummary;

/// Errors that can occur during a run.
#[derive(Debug, thiserror::Error)]
pub enum InvasionError {
    /// The input map could not be read or parsed.
    #[error("failed to load map: {source}")]
    Map {
        /// The underlying codec error.
        #[from]
        source: CodecError,
    },

    /// The scenario could not be set up or run.
    #[error("{source}")]
    Scenario {
        /// The underlying scenario error.
        #[from]
        source: ScenarioError,
    },

    /// The surviving map could not be written.
    #[error("failed to write map: {source}")]
    Output {
        /// The underlying I/O error.
        #[from]
        source: io::Error,
    },
}

/// Parameters of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    /// Aliens to land.
    pub aliens: u32,
    /// Moves each alien may make.
    pub max_moves: u32,
}

impl RunSettings {
    /// Land `aliens` aliens with the default move allowance.
    pub const fn new(aliens: u32) -> Self {
        Self {
            aliens,
            max_moves: DEFAULT_MAX_MOVES,
        }
    }

    /// Land `aliens` aliens with the configured move allowance.
    pub const fn from_config(aliens: u32, config: &InvasionConfig) -> Self {
        Self {
            aliens,
            max_moves: config.simulation.max_moves,
        }
    }
}

/// Read a map from `input`, run the invasion, and write the surviving map
/// to `output`.
///
/// Nothing is written unless the map parses and the aliens fit on it.
///
/// # Errors
///
/// Returns [`InvasionError::Map`] for unreadable or malformed input,
/// [`InvasionError::Scenario`] when there are more aliens than cities, and
/// [`InvasionError::Output`] when writing fails.
pub fn run_invasion<I, W, R, O>(
    input: I,
    output: &mut W,
    settings: RunSettings,
    rng: R,
    observer: &mut O,
) -> Result<SimulationSummary, InvasionError>
where
    I: BufRead,
    W: Write + ?Sized,
    R: Rng,
    O: InvasionObserver + ?Sized,
{
    let mut map = CityMap::new();
    read_map(input, &mut map)?;
    info!(
        cities = map.city_count(),
        roads = map.road_count(),
        "map loaded"
    );

    let mut scenario = Scenario::new(map, settings.aliens, settings.max_moves, rng)?;
    let summary = scenario.run(observer)?;

    write_map(output, scenario.map())?;
    output.flush()?;
    Ok(summary)
}
