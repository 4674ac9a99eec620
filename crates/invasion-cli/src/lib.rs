//! Command-line front end for the alien invasion simulation.
//!
//! Two binaries share this library:
//!
//! - `alien-invasion` reads a map, lands aliens, runs the invasion, and
//!   writes the surviving map ([`invade`]).
//! - `mapgen` writes a random map ([`generate`]).
//!
//! The map goes to stdout (or `-o`); logs and narration go to stderr.

pub mod args;
pub mod error;
pub mod generate;
pub mod invade;
pub mod logging;

pub use error::CliError;
