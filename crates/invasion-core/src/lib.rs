//! Simulation engine for the alien invasion.
//!
//! Aliens land on distinct random cities and wander the road graph one move
//! per round. Two aliens meeting in a city destroy it, themselves, and every
//! road in or out of it. The run ends when no alien has a move left.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration with environment overrides.
//! - [`observer`] -- [`InvasionObserver`] hooks for destruction events and
//!   round summaries, plus the stock observers.
//! - [`runner`] -- [`run_invasion`]: read a map, run a scenario, write the
//!   surviving map.
//! - [`scenario`] -- [`Scenario`], the round loop itself.
//! - [`summary`] -- [`SimulationSummary`], what a finished run reports.
//!
//! [`InvasionObserver`]: observer::InvasionObserver
//! [`run_invasion`]: runner::run_invasion
//! [`Scenario`]: scenario::Scenario
//! [`SimulationSummary`]: summary::SimulationSummary

pub mod config;
pub mod observer;
pub mod runner;
pub mod scenario;
pub mod summary;

pub use config::{ConfigError, InvasionConfig};
pub use observer::{
    CityDestroyed, InvasionObserver, NarrationObserver, NoOpObserver, RecordingObserver,
    RoundSummary, TracingObserver,
};
pub use runner::{InvasionError, RunSettings, run_invasion};
pub use scenario::{DEFAULT_MAX_MOVES, Scenario, ScenarioError};
pub use summary::SimulationSummary;
