//! Random map generation.
//!
//! Builds a map of `N` cities named like spreadsheet columns (`A`..`Z`,
//! `AA`, `AB`, ...). Every city gets between one and four outgoing roads,
//! each in a different randomly chosen direction, to distinct randomly
//! chosen other cities. Roads are not mirrored: `A north=B` does not imply
//! a road back from `B`.
//!
//! All randomness comes from the caller's [`Rng`], so a seeded generator
//! always produces the same map.

use invasion_types::Direction;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::city_map::CityMap;
use crate::error::GeneratorError;

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a random map with `city_count` cities.
///
/// # Errors
///
/// Returns [`GeneratorError::NoCities`] for zero cities and
/// [`GeneratorError::NoNeighbours`] for a single city, which would have
/// nowhere to build a road to.
pub fn generate_map<R: Rng + ?Sized>(rng: &mut R, city_count: usize) -> Result<CityMap, GeneratorError> {
    match city_count {
        0 => return Err(GeneratorError::NoCities),
        1 => return Err(GeneratorError::NoNeighbours),
        _ => {}
    }

    let mut names: Vec<String> = (0..city_count).map(city_name).collect();
    names.shuffle(rng);

    let mut map = CityMap::new();
    for name in &names {
        map.init_city(name);

        let mut others: Vec<&String> = names.iter().filter(|other| *other != name).collect();
        others.shuffle(rng);

        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        let road_count = rng.random_range(1..=directions.len());

        for (direction, to) in directions.iter().take(road_count).zip(others) {
            map.link_cities(name, to, *direction)?;
        }
    }

    debug!(
        cities = map.city_count(),
        roads = map.road_count(),
        "random map generated"
    );
    Ok(map)
}

/// Spreadsheet-style name for the city at a zero-based index:
/// `0 -> A`, `25 -> Z`, `26 -> AA`, `701 -> ZZ`, `702 -> AAA`.
pub fn city_name(index: usize) -> String {
    let mut letters = Vec::new();
    let mut remaining = index;
    loop {
        if let Some(&letter) = LETTERS.get(remaining % LETTERS.len()) {
            letters.push(char::from(letter));
        }
        remaining /= LETTERS.len();
        if remaining == 0 {
            break;
        }
        remaining = remaining.saturating_sub(1);
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::text;

    #[test]
    fn names_follow_spreadsheet_columns() {
        assert_eq!(city_name(0), "A");
        assert_eq!(city_name(25), "Z");
        assert_eq!(city_name(26), "AA");
        assert_eq!(city_name(27), "AB");
        assert_eq!(city_name(51), "AZ");
        assert_eq!(city_name(52), "BA");
        assert_eq!(city_name(701), "ZZ");
        assert_eq!(city_name(702), "AAA");
    }

    #[test]
    fn zero_cities_rejected() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(generate_map(&mut rng, 0), Err(GeneratorError::NoCities));
    }

    #[test]
    fn single_city_rejected() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(generate_map(&mut rng, 1), Err(GeneratorError::NoNeighbours));
    }

    #[test]
    fn every_city_has_one_to_four_roads() {
        let mut rng = SmallRng::seed_from_u64(7);
        let map = generate_map(&mut rng, 30).unwrap_or_default();
        assert_eq!(map.city_count(), 30);
        assert!(
            map.list_cities()
                .iter()
                .all(|city| (1..=4).contains(&city.road_count()))
        );
        assert!(map.is_consistent());
    }

    #[test]
    fn two_cities_link_to_each_other() {
        let mut rng = SmallRng::seed_from_u64(3);
        let map = generate_map(&mut rng, 2).unwrap_or_default();
        assert_eq!(map.road_count(), 2);
        assert!(map.roads().all(|(from, _, to)| from != to));
    }

    #[test]
    fn same_seed_same_map() {
        let a = generate_map(&mut SmallRng::seed_from_u64(42), 12);
        let b = generate_map(&mut SmallRng::seed_from_u64(42), 12);
        assert_eq!(a, b);
    }

    #[test]
    fn generated_map_is_valid_input() {
        let mut rng = SmallRng::seed_from_u64(99);
        let map = generate_map(&mut rng, 26).unwrap_or_default();
        let reparsed = text::parse_map(&text::map_to_string(&map));
        assert_eq!(reparsed.ok(), Some(map));
    }
}
