//! City graph: named cities as nodes, direction-labelled roads as edges.
//!
//! The [`CityMap`] is the single owner of every [`City`]. Cities refer to
//! each other by name only, so the graph may contain any number of cycles
//! without shared ownership. Every road is stored twice:
//!
//! - in the source city's outgoing roads, keyed by [`Direction`];
//! - as a [`Road`] back-reference in the destination city.
//!
//! [`CityMap::link_cities`] writes both halves and
//! [`CityMap::destroy_city`] removes both halves of every road touching the
//! destroyed city, so no surviving city ever names a city that is gone.

use std::collections::BTreeMap;

use invasion_types::{AlienId, Direction};
use tracing::debug;

use crate::city::{City, Road};
use crate::error::MapError;

/// The city graph, indexed by city name.
///
/// Iteration is always in ascending name order, which is what makes map
/// output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityMap {
    /// All cities indexed by name.
    cities: BTreeMap<String, City>,
}

impl CityMap {
    /// Create an empty map.
    pub const fn new() -> Self {
        Self {
            cities: BTreeMap::new(),
        }
    }

    // -------------------------------------------------------------------
    // City operations
    // -------------------------------------------------------------------

    /// Return the city with the given name, creating an empty one if the
    /// name is not indexed yet.
    pub fn init_city(&mut self, name: &str) -> &mut City {
        self.cities
            .entry(name.to_owned())
            .or_insert_with(|| City::new(name))
    }

    /// Get an immutable reference to a city.
    pub fn get(&self, name: &str) -> Option<&City> {
        self.cities.get(name)
    }

    /// Get a mutable reference to a city.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut City> {
        self.cities.get_mut(name)
    }

    /// Whether a city with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.cities.contains_key(name)
    }

    /// Number of cities in the map.
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Whether the map has no cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Iterate over city names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cities.keys().map(String::as_str)
    }

    /// All cities sorted by name.
    pub fn list_cities(&self) -> Vec<&City> {
        self.cities.values().collect()
    }

    // -------------------------------------------------------------------
    // Road operations
    // -------------------------------------------------------------------

    /// Add a road from `from` to `to` leaving `from` in `direction`.
    ///
    /// Missing endpoints are created. Validation happens before anything is
    /// touched, so a rejected link leaves the map unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::SelfLink`] if `from == to`, or
    /// [`MapError::DuplicateDirection`] if `from` already has a road in
    /// `direction`.
    pub fn link_cities(&mut self, from: &str, to: &str, direction: Direction) -> Result<(), MapError> {
        self.validate_link(from, to, direction)?;
        self.init_city(from).insert_road(direction, to);
        self.init_city(to).insert_incoming(Road::new(from, direction));
        debug!(from, to, %direction, "cities linked");
        Ok(())
    }

    /// Check that a road can be added without breaking graph invariants.
    ///
    /// A city that does not exist yet cannot have a conflicting direction.
    fn validate_link(&self, from: &str, to: &str, direction: Direction) -> Result<(), MapError> {
        if from == to {
            return Err(MapError::SelfLink {
                city: from.to_owned(),
            });
        }
        if self.cities.get(from).is_some_and(|city| city.has_road(direction)) {
            return Err(MapError::DuplicateDirection {
                city: from.to_owned(),
                direction,
            });
        }
        Ok(())
    }

    /// Total number of roads in the map.
    pub fn road_count(&self) -> usize {
        self.cities.values().map(City::road_count).sum()
    }

    /// Iterate over every road as `(from, direction, to)`, ordered by source
    /// name, then direction.
    pub fn roads(&self) -> impl Iterator<Item = (&str, Direction, &str)> {
        self.cities.values().flat_map(|city| {
            city.roads()
                .map(move |(direction, to)| (city.name(), direction, to))
        })
    }

    /// Remove a city and every road that starts or ends there.
    ///
    /// Each outgoing road's back-reference is removed from its destination,
    /// and each incoming road is removed from its source city. Cities that
    /// are not adjacent to the destroyed one are untouched.
    ///
    /// Returns the removed city, or `None` if no city had that name.
    pub fn destroy_city(&mut self, name: &str) -> Option<City> {
        let city = self.cities.remove(name)?;

        for (direction, to) in city.roads() {
            if let Some(target) = self.cities.get_mut(to) {
                target.remove_incoming(&Road::new(name, direction));
            }
        }

        for road in city.incoming() {
            if let Some(source) = self.cities.get_mut(&road.from)
                && source.road(road.direction) == Some(name)
            {
                source.remove_road(road.direction);
            }
        }

        debug!(
            city = name,
            outgoing = city.road_count(),
            incoming = city.incoming().count(),
            "city removed from map"
        );
        Some(city)
    }

    // -------------------------------------------------------------------
    // Occupant operations
    // -------------------------------------------------------------------

    /// Put an alien into a city.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::CityNotFound`] if the city does not exist.
    pub fn place_alien(&mut self, alien: AlienId, city: &str) -> Result<(), MapError> {
        self.cities
            .get_mut(city)
            .ok_or_else(|| MapError::CityNotFound(city.to_owned()))?
            .add_occupant(alien);
        Ok(())
    }

    /// Move an alien from one city to another.
    ///
    /// The alien is appended to the destination's occupants, so occupant
    /// order is arrival order. Both cities are checked before either is
    /// modified.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::CityNotFound`] if either city is missing, or
    /// [`MapError::AlienNotInCity`] if the alien is not at `from`.
    pub fn move_alien(&mut self, alien: AlienId, from: &str, to: &str) -> Result<(), MapError> {
        if !self.cities.contains_key(to) {
            return Err(MapError::CityNotFound(to.to_owned()));
        }

        // Remove from source.
        {
            let source = self
                .cities
                .get_mut(from)
                .ok_or_else(|| MapError::CityNotFound(from.to_owned()))?;
            if !source.remove_occupant(alien) {
                return Err(MapError::AlienNotInCity {
                    alien,
                    city: from.to_owned(),
                });
            }
        }

        // Add to destination.
        self.cities
            .get_mut(to)
            .ok_or_else(|| MapError::CityNotFound(to.to_owned()))?
            .add_occupant(alien);

        Ok(())
    }

    // -------------------------------------------------------------------
    // Invariants
    // -------------------------------------------------------------------

    /// Check that every road is mirrored and points at an existing city.
    ///
    /// Holds when every outgoing road has a matching back-reference in its
    /// destination, every back-reference has a matching outgoing road in its
    /// source, and no city has a road to itself.
    pub fn is_consistent(&self) -> bool {
        let outgoing_mirrored = self.roads().all(|(from, direction, to)| {
            from != to
                && self
                    .cities
                    .get(to)
                    .is_some_and(|target| target.has_incoming(from, direction))
        });

        let incoming_mirrored = self.cities.values().all(|city| {
            city.incoming().all(|road| {
                self.cities
                    .get(&road.from)
                    .and_then(|source| source.road(road.direction))
                    == Some(city.name())
            })
        });

        outgoing_mirrored && incoming_mirrored
    }
}
