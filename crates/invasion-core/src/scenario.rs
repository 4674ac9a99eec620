//! The invasion round loop.
//!
//! A [`Scenario`] owns the city map, where each alien is, and how many moves
//! each alien has left. [`Scenario::run`] plays rounds until no alien can
//! move:
//!
//! 1. **Queue** -- every living alien with moves left, shuffled.
//! 2. **Turns** -- in queue order, each alien still alive moves along a
//!    random outgoing road of its city. An alien whose city has no roads is
//!    stranded and stops for good.
//! 3. **Collisions** -- as soon as a move brings a second alien into a city,
//!    the city is destroyed together with its roads and every alien in it.
//!    Later aliens in the same round see the damage.
//!
//! Every alien's move counter drops by one per move, so the loop ends after
//! at most `max_moves` rounds.
//!
//! All randomness comes from the injected [`Rng`], so a seeded generator
//! replays the same invasion.

use std::collections::{BTreeMap, BTreeSet};

use invasion_types::AlienId;
use invasion_world::{CityMap, MapError};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use tracing::{debug, info, trace};

use crate::observer::{CityDestroyed, InvasionObserver, RoundSummary};
use crate::summary::SimulationSummary;

/// Moves each alien may make when nothing else is configured.
pub const DEFAULT_MAX_MOVES: u32 = 10_000;

/// Errors that can occur while setting up or running a scenario.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    /// More aliens were requested than there are cities to land on.
    #[error("aliens count {aliens} is greater than number of cities ({cities})")]
    TooManyAliens {
        /// Requested number of aliens.
        aliens: u32,
        /// Number of cities in the map.
        cities: usize,
    },

    /// The map and the alien bookkeeping disagree.
    #[error("world error: {source}")]
    World {
        /// The underlying map error.
        #[from]
        source: MapError,
    },
}

/// A running (or finished) invasion.
#[derive(Debug)]
pub struct Scenario<R> {
    map: CityMap,
    alien_count: u32,
    max_moves: u32,
    /// Living aliens and the city each one is in.
    locations: BTreeMap<AlienId, String>,
    /// Moves left per living alien.
    moves_left: BTreeMap<AlienId, u32>,
    /// Living aliens stuck in a city with no roads out.
    stranded: BTreeSet<AlienId>,
    rng: R,
    rounds: u64,
    total_moves: u64,
    destroyed: Vec<CityDestroyed>,
}

impl<R: Rng> Scenario<R> {
    /// Land `aliens` aliens on distinct random cities of `map`.
    ///
    /// Alien `i` lands on the `i`-th city of a shuffled city list. Every
    /// alien starts with `max_moves` moves.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::TooManyAliens`] if `aliens` exceeds the
    /// number of cities. Nothing is placed in that case.
    pub fn new(map: CityMap, aliens: u32, max_moves: u32, rng: R) -> Result<Self, ScenarioError> {
        let cities = map.city_count();
        if !usize::try_from(aliens).is_ok_and(|wanted| wanted <= cities) {
            return Err(ScenarioError::TooManyAliens { aliens, cities });
        }

        let mut scenario = Self {
            map,
            alien_count: aliens,
            max_moves,
            locations: BTreeMap::new(),
            moves_left: BTreeMap::new(),
            stranded: BTreeSet::new(),
            rng,
            rounds: 0,
            total_moves: 0,
            destroyed: Vec::new(),
        };
        scenario.land_aliens()?;
        Ok(scenario)
    }

    fn land_aliens(&mut self) -> Result<(), ScenarioError> {
        let mut names: Vec<String> = self.map.names().map(str::to_owned).collect();
        names.shuffle(&mut self.rng);

        for (index, city) in (0..self.alien_count).zip(names) {
            let alien = AlienId::new(index);
            self.map.place_alien(alien, &city)?;
            debug!(alien = %alien, city = %city, "alien landed");
            self.locations.insert(alien, city);
            self.moves_left.insert(alien, self.max_moves);
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// The map in its current state.
    pub const fn map(&self) -> &CityMap {
        &self.map
    }

    /// Consume the scenario and keep the map.
    pub fn into_map(self) -> CityMap {
        self.map
    }

    /// City the alien is in, or `None` once it is dead.
    pub fn alien_city(&self, alien: AlienId) -> Option<&str> {
        self.locations.get(&alien).map(String::as_str)
    }

    /// Moves the alien has left. Dead aliens have none.
    pub fn moves_left(&self, alien: AlienId) -> u32 {
        self.moves_left.get(&alien).copied().unwrap_or(0)
    }

    /// Whether the alien is alive and still has moves left.
    pub fn is_active(&self, alien: AlienId) -> bool {
        self.locations.contains_key(&alien) && self.moves_left(alien) > 0
    }

    /// Living aliens with moves left, by id.
    pub fn active_aliens(&self) -> Vec<AlienId> {
        self.locations
            .keys()
            .copied()
            .filter(|alien| self.moves_left(*alien) > 0)
            .collect()
    }

    /// Rounds played so far.
    pub const fn rounds(&self) -> u64 {
        self.rounds
    }

    // -------------------------------------------------------------------
    // Round loop
    // -------------------------------------------------------------------

    /// Play rounds until no alien can move, then report.
    ///
    /// The observer hears about every destroyed city as it falls and about
    /// the end of every round.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::World`] if the map no longer agrees with
    /// where the aliens are. That cannot happen through the public API.
    pub fn run<O>(&mut self, observer: &mut O) -> Result<SimulationSummary, ScenarioError>
    where
        O: InvasionObserver + ?Sized,
    {
        info!(
            aliens = self.alien_count,
            cities = self.map.city_count(),
            roads = self.map.road_count(),
            max_moves = self.max_moves,
            "invasion starting"
        );

        loop {
            let queue = self.round_queue();
            if queue.is_empty() {
                break;
            }
            self.rounds = self.rounds.saturating_add(1);
            let moves_before = self.total_moves;
            let destroyed_before = self.destroyed.len();

            for alien in queue {
                self.take_turn(alien, observer)?;
            }

            let summary = RoundSummary {
                round: self.rounds,
                moves: self.total_moves.saturating_sub(moves_before),
                cities_destroyed: self.destroyed.len().saturating_sub(destroyed_before),
                active_aliens: self.active_aliens().len(),
                cities_remaining: self.map.city_count(),
            };
            observer.on_round_complete(&summary);
        }

        let summary = self.summary();
        info!(
            rounds = summary.rounds,
            total_moves = summary.total_moves,
            cities_destroyed = summary.cities_destroyed(),
            survivors = summary.survivors.len(),
            stranded = summary.stranded.len(),
            cities_remaining = summary.cities_remaining,
            "invasion over"
        );
        Ok(summary)
    }

    /// Snapshot of the run so far.
    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            aliens: self.alien_count,
            max_moves: self.max_moves,
            rounds: self.rounds,
            total_moves: self.total_moves,
            destroyed: self.destroyed.clone(),
            survivors: self.locations.keys().copied().collect(),
            stranded: self.stranded.iter().copied().collect(),
            cities_remaining: self.map.city_count(),
            roads_remaining: self.map.road_count(),
        }
    }

    /// Active aliens in random order.
    fn round_queue(&mut self) -> Vec<AlienId> {
        let mut queue = self.active_aliens();
        queue.shuffle(&mut self.rng);
        queue
    }

    fn take_turn<O>(&mut self, alien: AlienId, observer: &mut O) -> Result<(), ScenarioError>
    where
        O: InvasionObserver + ?Sized,
    {
        // Killed earlier in this round.
        if !self.is_active(alien) {
            return Ok(());
        }

        match self.step(alien)? {
            Some(city) => self.resolve_collision(&city, observer),
            None => {
                self.moves_left.insert(alien, 0);
                self.stranded.insert(alien);
                debug!(
                    alien = %alien,
                    city = self.alien_city(alien).unwrap_or_default(),
                    "alien stranded"
                );
            }
        }
        Ok(())
    }

    /// Move the alien along a random road of its city.
    ///
    /// Returns the destination, or `None` if the city has no roads.
    fn step(&mut self, alien: AlienId) -> Result<Option<String>, ScenarioError> {
        let Some(from) = self.locations.get(&alien).cloned() else {
            return Ok(None);
        };
        let city = self
            .map
            .get(&from)
            .ok_or_else(|| MapError::CityNotFound(from.clone()))?;

        let directions = city.directions();
        let Some(&direction) = directions.choose(&mut self.rng) else {
            return Ok(None);
        };
        let Some(to) = city.road(direction).map(str::to_owned) else {
            return Ok(None);
        };

        self.map.move_alien(alien, &from, &to)?;
        trace!(alien = %alien, from = %from, %direction, to = %to, "alien moved");

        self.locations.insert(alien, to.clone());
        if let Some(moves) = self.moves_left.get_mut(&alien) {
            *moves = moves.saturating_sub(1);
        }
        self.total_moves = self.total_moves.saturating_add(1);
        Ok(Some(to))
    }

    /// Destroy the city if the last arrival made it crowded.
    fn resolve_collision<O>(&mut self, name: &str, observer: &mut O)
    where
        O: InvasionObserver + ?Sized,
    {
        let Some(city) = self.map.get(name) else {
            return;
        };
        if !city.is_overrun() {
            return;
        }

        let event = CityDestroyed {
            city: name.to_owned(),
            aliens: city.occupants().to_vec(),
            round: self.rounds,
        };
        for alien in &event.aliens {
            self.locations.remove(alien);
            self.moves_left.insert(*alien, 0);
            self.stranded.remove(alien);
        }
        self.map.destroy_city(name);

        debug!(
            city = %event.city,
            aliens = ?event.aliens,
            round = event.round,
            "aliens met, city destroyed"
        );
        observer.on_city_destroyed(&event);
        self.destroyed.push(event);
    }
}
