//! Geography for the alien invasion simulation.
//!
//! This crate models the world the aliens land on: named cities as nodes
//! of a directed graph, roads as direction-labelled edges between them.
//!
//! # Modules
//!
//! - [`city`] -- [`City`] nodes with outgoing roads, incoming back-references,
//!   and the aliens currently present.
//! - [`city_map`] -- [`CityMap`], the arena that owns every city and keeps
//!   both ends of every road in sync, including on destruction.
//! - [`error`] -- Error types for graph, codec, and generator operations.
//! - [`generator`] -- Random map generation.
//! - [`text`] -- The line-oriented map text format.
//!
//! [`City`]: city::City
//! [`CityMap`]: city_map::CityMap

pub mod city;
pub mod city_map;
pub mod error;
pub mod generator;
pub mod text;

// Re-export primary types at crate root.
pub use city::{City, Road};
pub use city_map::CityMap;
pub use error::{CodecError, GeneratorError, MapError, ParseReason};
pub use generator::generate_map;
pub use text::{map_to_string, parse_map, read_map, write_map};
