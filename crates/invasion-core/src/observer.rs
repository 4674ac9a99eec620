//! Hooks for watching a run as it happens.
//!
//! [`Scenario::run`] reports every destroyed city and the end of every round
//! to an [`InvasionObserver`]. The stock observers cover the common cases:
//!
//! - [`NoOpObserver`] ignores everything.
//! - [`TracingObserver`] emits structured `tracing` events.
//! - [`NarrationObserver`] writes one plain line per destroyed city, the
//!   human-readable account of the invasion.
//! - [`RecordingObserver`] keeps every event for later inspection.
//!
//! [`Scenario::run`]: crate::scenario::Scenario::run

use std::io::Write;

use invasion_types::AlienId;
use serde::Serialize;
use tracing::{debug, info, warn};

/// A city torn apart by the aliens that met in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityDestroyed {
    /// Name of the destroyed city.
    pub city: String,
    /// Aliens that were in the city, in arrival order. All of them die.
    pub aliens: Vec<AlienId>,
    /// Round in which it happened (1-based).
    pub round: u64,
}

impl CityDestroyed {
    /// One-line account of the destruction:
    /// `Foo has been destroyed by alien 1 and alien 2`.
    ///
    /// Aliens are numbered from 1.
    pub fn narration(&self) -> String {
        let names: Vec<String> = self.aliens.iter().map(|alien| format!("alien {alien}")).collect();
        let attackers = match names.split_last() {
            None => String::from("nobody"),
            Some((last, [])) => last.clone(),
            Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
        };
        format!("{} has been destroyed by {attackers}", self.city)
    }
}

/// What happened during one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    /// Round number (1-based).
    pub round: u64,
    /// Moves made during the round.
    pub moves: u64,
    /// Cities destroyed during the round.
    pub cities_destroyed: usize,
    /// Aliens still alive with moves left, after the round.
    pub active_aliens: usize,
    /// Cities still standing, after the round.
    pub cities_remaining: usize,
}

/// Callback invoked while a scenario runs.
pub trait InvasionObserver {
    /// Called right after a city is destroyed, before the next alien moves.
    fn on_city_destroyed(&mut self, event: &CityDestroyed);

    /// Called after every alien in the round queue has had its turn.
    fn on_round_complete(&mut self, _summary: &RoundSummary) {}
}

/// An observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl InvasionObserver for NoOpObserver {
    fn on_city_destroyed(&mut self, _event: &CityDestroyed) {}
}

/// An observer that logs through `tracing`.
///
/// Destructions are logged at `info`, round summaries at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl InvasionObserver for TracingObserver {
    fn on_city_destroyed(&mut self, event: &CityDestroyed) {
        info!(
            city = %event.city,
            aliens = ?event.aliens,
            round = event.round,
            "city destroyed"
        );
    }

    fn on_round_complete(&mut self, summary: &RoundSummary) {
        debug!(
            round = summary.round,
            moves = summary.moves,
            cities_destroyed = summary.cities_destroyed,
            active_aliens = summary.active_aliens,
            cities_remaining = summary.cities_remaining,
            "round complete"
        );
    }
}

/// An observer that writes one narration line per destroyed city.
///
/// Write failures are logged and otherwise ignored; the run itself does not
/// depend on the narration reaching its destination.
#[derive(Debug)]
pub struct NarrationObserver<W> {
    writer: W,
}

impl<W: Write> NarrationObserver<W> {
    /// Narrate to the given writer.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> InvasionObserver for NarrationObserver<W> {
    fn on_city_destroyed(&mut self, event: &CityDestroyed) {
        if let Err(error) = writeln!(self.writer, "{}", event.narration()) {
            warn!(city = %event.city, %error, "failed to write narration");
        }
    }
}

/// An observer that records every event it sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingObserver {
    /// Every destruction, in order.
    pub destroyed: Vec<CityDestroyed>,
    /// Every round summary, in order.
    pub rounds: Vec<RoundSummary>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub const fn new() -> Self {
        Self {
            destroyed: Vec::new(),
            rounds: Vec::new(),
        }
    }
}

impl InvasionObserver for RecordingObserver {
    fn on_city_destroyed(&mut self, event: &CityDestroyed) {
        self.destroyed.push(event.clone());
    }

    fn on_round_complete(&mut self, summary: &RoundSummary) {
        self.rounds.push(*summary);
    }
}

/// Forward every event to two observers.
impl<A, B> InvasionObserver for (A, B)
where
    A: InvasionObserver,
    B: InvasionObserver,
{
    fn on_city_destroyed(&mut self, event: &CityDestroyed) {
        self.0.on_city_destroyed(event);
        self.1.on_city_destroyed(event);
    }

    fn on_round_complete(&mut self, summary: &RoundSummary) {
        self.0.on_round_complete(summary);
        self.1.on_round_complete(summary);
    }
}
