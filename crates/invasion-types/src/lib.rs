//! Shared type definitions for the alien invasion simulation.
//!
//! This crate contains the leaf types every other crate speaks in:
//!
//! - [`Direction`] -- the four compass directions a road can point in.
//! - [`AlienId`] -- the identity of a single invader.
//!
//! It has no logic beyond name lookups and formatting, so the world and
//! engine crates can depend on it without pulling anything else in.

pub mod direction;
pub mod ids;

pub use direction::Direction;
pub use ids::AlienId;
