//! City node with road bookkeeping and occupant tracking.
//!
//! A [`City`] stores its outgoing roads keyed by [`Direction`], a set of
//! [`Road`] back-references describing the roads that arrive here, and the
//! aliens currently present. Neighbours are referred to by name; the
//! [`CityMap`] that owns every city resolves names when it needs to reach
//! the other end of a road.
//!
//! Roads can only be added or removed through the [`CityMap`], which keeps
//! the outgoing entry and its back-reference in sync.
//!
//! [`CityMap`]: crate::city_map::CityMap

use std::collections::{BTreeMap, BTreeSet};

use invasion_types::{AlienId, Direction};

/// Back-reference to a road arriving at a city.
///
/// Records which city the road starts from and in which direction it
/// leaves that city. It is a lookup aid for tearing roads down, not an
/// owning link.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Road {
    /// Name of the city the road starts from.
    pub from: String,
    /// Direction the road leaves `from` in.
    pub direction: Direction,
}

impl Road {
    /// Create a back-reference for the road leaving `from` towards `direction`.
    pub fn new(from: &str, direction: Direction) -> Self {
        Self {
            from: from.to_owned(),
            direction,
        }
    }
}

/// A node in the city graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    /// Unique name, also the key in the owning map.
    name: String,
    /// Outgoing roads: direction -> destination city name.
    out_roads: BTreeMap<Direction, String>,
    /// Roads arriving here from other cities.
    in_roads: BTreeSet<Road>,
    /// Aliens currently in the city, in arrival order.
    occupants: Vec<AlienId>,
}

impl City {
    /// Create a city with no roads and no occupants.
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            out_roads: BTreeMap::new(),
            in_roads: BTreeSet::new(),
            occupants: Vec::new(),
        }
    }

    /// The city's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    // -------------------------------------------------------------------
    // Roads
    // -------------------------------------------------------------------

    /// Destination of the outgoing road in `direction`, if there is one.
    pub fn road(&self, direction: Direction) -> Option<&str> {
        self.out_roads.get(&direction).map(String::as_str)
    }

    /// Whether an outgoing road already uses `direction`.
    pub fn has_road(&self, direction: Direction) -> bool {
        self.out_roads.contains_key(&direction)
    }

    /// Iterate over outgoing roads as `(direction, destination)` pairs,
    /// in direction order.
    pub fn roads(&self) -> impl Iterator<Item = (Direction, &str)> {
        self.out_roads
            .iter()
            .map(|(direction, to)| (*direction, to.as_str()))
    }

    /// All directions with an outgoing road, in direction order.
    pub fn directions(&self) -> Vec<Direction> {
        self.out_roads.keys().copied().collect()
    }

    /// Number of outgoing roads.
    pub fn road_count(&self) -> usize {
        self.out_roads.len()
    }

    /// Iterate over the back-references of roads arriving here.
    pub fn incoming(&self) -> impl Iterator<Item = &Road> {
        self.in_roads.iter()
    }

    /// Whether the road leaving `from` towards `direction` is recorded as
    /// arriving here.
    pub fn has_incoming(&self, from: &str, direction: Direction) -> bool {
        self.in_roads
            .iter()
            .any(|road| road.direction == direction && road.from == from)
    }

    pub(crate) fn insert_road(&mut self, direction: Direction, to: &str) {
        self.out_roads.insert(direction, to.to_owned());
    }

    pub(crate) fn remove_road(&mut self, direction: Direction) -> Option<String> {
        self.out_roads.remove(&direction)
    }

    pub(crate) fn insert_incoming(&mut self, road: Road) {
        self.in_roads.insert(road);
    }

    pub(crate) fn remove_incoming(&mut self, road: &Road) -> bool {
        self.in_roads.remove(road)
    }

    // -------------------------------------------------------------------
    // Occupants
    // -------------------------------------------------------------------

    /// Aliens currently in the city, in arrival order.
    pub fn occupants(&self) -> &[AlienId] {
        &self.occupants
    }

    /// Number of aliens currently in the city.
    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    /// Whether enough aliens are present to tear the city apart.
    pub fn is_overrun(&self) -> bool {
        self.occupants.len() >= 2
    }

    /// Whether a specific alien is in the city.
    pub fn contains_alien(&self, alien: AlienId) -> bool {
        self.occupants.contains(&alien)
    }

    /// Record an alien arriving in the city.
    pub fn add_occupant(&mut self, alien: AlienId) {
        self.occupants.push(alien);
    }

    /// Remove an alien from the city.
    ///
    /// Returns `false` if the alien was not here.
    pub fn remove_occupant(&mut self, alien: AlienId) -> bool {
        let before = self.occupants.len();
        self.occupants.retain(|present| *present != alien);
        self.occupants.len() != before
    }
}

impl core::fmt::Display for City {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}
