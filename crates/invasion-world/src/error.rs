//! Error types for the `invasion-world` crate.
//!
//! Graph mutations fail with [`MapError`], reading the map text format
//! fails with [`CodecError`], and random map generation fails with
//! [`GeneratorError`].

use std::io;

use invasion_types::{AlienId, Direction};

/// Errors that can occur during city-graph operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// A road from a city to itself was requested.
    #[error("attempt to link city {city} to itself")]
    SelfLink {
        /// The city on both ends of the rejected road.
        city: String,
    },

    /// The city already has an outgoing road in the requested direction.
    #[error("direction {direction} is taken for city {city}")]
    DuplicateDirection {
        /// The source city.
        city: String,
        /// The direction that is already in use.
        direction: Direction,
    },

    /// A city was not found in the graph.
    #[error("city not found: {0}")]
    CityNotFound(String),

    /// The alien is not present in the specified city.
    #[error("alien {alien} is not in city {city}")]
    AlienNotInCity {
        /// The alien.
        alien: AlienId,
        /// The city it was expected in.
        city: String,
    },
}

/// Errors that can occur while reading a map in the text format.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The underlying reader failed.
    #[error("failed to read map: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// A line could not be parsed or applied to the graph.
    #[error("invalid line {line} \"{text}\": {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The raw line text.
        text: String,
        /// What was wrong with it.
        reason: ParseReason,
    },
}

/// Why a single map line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseReason {
    /// The line holds no tokens at all.
    #[error("empty line")]
    EmptyLine,

    /// The line names a city but no roads.
    #[error("city must have at least one outgoing road")]
    MissingRoads,

    /// The line declares more roads than there are directions.
    #[error("city must have at most four outgoing roads, found {count}")]
    TooManyRoads {
        /// Number of road tokens found.
        count: usize,
    },

    /// A road token is not of the form `<direction>=<city>`.
    #[error("invalid road encoding {token:?}, expected <direction>=<city>")]
    MalformedRoad {
        /// The offending token.
        token: String,
    },

    /// A road token names a direction that does not exist.
    #[error("invalid direction name {name:?}")]
    UnknownDirection {
        /// The unrecognised direction name.
        name: String,
    },

    /// The road was well-formed but the graph refused it.
    #[error(transparent)]
    Link(#[from] MapError),
}

/// Errors that can occur during random map generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorError {
    /// Zero cities were requested.
    #[error("number of cities must be greater than 0")]
    NoCities,

    /// A single city has nothing to link to, so it cannot be written as a
    /// valid map line.
    #[error("a map needs at least 2 cities so every city has a road")]
    NoNeighbours,

    /// Linking two generated cities failed.
    #[error("world error: {0}")]
    Link(#[from] MapError),
}
