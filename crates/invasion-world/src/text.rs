//! Line-oriented map text format.
//!
//! One city per line: the city name first, followed by 1-4 roads written as
//! `<direction>=<city>`, separated by whitespace:
//!
//! ```text
//! Foo north=Bar west=Baz south=Qu-ux
//! Bar south=Foo west=Bee
//! ```
//!
//! Direction names are case-insensitive. Cities that only appear as road
//! destinations are created on demand. Empty lines and lines without roads
//! are rejected.
//!
//! Reading is not transactional: when a line fails, the cities and roads
//! from the lines before it stay in the map.
//!
//! Writing emits one line per city in name order, roads in direction order.
//! A city left with no roads (after its neighbours were destroyed) is
//! written as its bare name.

use std::io::{self, BufRead, Write};

use invasion_types::Direction;

use crate::city_map::CityMap;
use crate::error::{CodecError, ParseReason};

/// Maximum number of roads a single line may declare.
pub const MAX_ROADS_PER_CITY: usize = Direction::ALL.len();

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write the map in the text format.
pub fn write_map<W: Write + ?Sized>(writer: &mut W, map: &CityMap) -> io::Result<()> {
    for city in map.list_cities() {
        writer.write_all(city.name().as_bytes())?;
        for (direction, to) in city.roads() {
            write!(writer, " {direction}={to}")?;
        }
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Render the map in the text format.
pub fn map_to_string(map: &CityMap) -> String {
    let mut out = String::new();
    for city in map.list_cities() {
        out.push_str(city.name());
        for (direction, to) in city.roads() {
            out.push(' ');
            out.push_str(direction.name());
            out.push('=');
            out.push_str(to);
        }
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read a map in the text format, adding its cities and roads to `map`.
///
/// # Errors
///
/// Returns [`CodecError::Io`] if the reader fails, or [`CodecError::Parse`]
/// carrying the 1-based line number and raw text of the first bad line.
pub fn read_map<R: BufRead>(reader: R, map: &mut CityMap) -> Result<(), CodecError> {
    for (index, line) in reader.lines().enumerate() {
        let text = line?;
        if let Err(reason) = parse_city_line(&text, map) {
            return Err(CodecError::Parse {
                line: index.saturating_add(1),
                text,
                reason,
            });
        }
    }
    Ok(())
}

/// Parse a complete map from a string into a fresh [`CityMap`].
///
/// # Errors
///
/// Same as [`read_map`].
pub fn parse_map(text: &str) -> Result<CityMap, CodecError> {
    let mut map = CityMap::new();
    read_map(text.as_bytes(), &mut map)?;
    Ok(map)
}

/// Validate one line and apply it to the map.
fn parse_city_line(line: &str, map: &mut CityMap) -> Result<(), ParseReason> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, road_tokens)) = tokens.split_first() else {
        return Err(ParseReason::EmptyLine);
    };
    if road_tokens.is_empty() {
        return Err(ParseReason::MissingRoads);
    }
    if road_tokens.len() > MAX_ROADS_PER_CITY {
        return Err(ParseReason::TooManyRoads {
            count: road_tokens.len(),
        });
    }

    let roads = road_tokens
        .iter()
        .map(|token| parse_road(token))
        .collect::<Result<Vec<_>, _>>()?;

    map.init_city(name);
    for (direction, to) in roads {
        map.link_cities(name, to, direction)?;
    }
    Ok(())
}

/// Split a `<direction>=<city>` token.
fn parse_road(token: &str) -> Result<(Direction, &str), ParseReason> {
    let malformed = || ParseReason::MalformedRoad {
        token: token.to_owned(),
    };
    let (direction, to) = token.split_once('=').ok_or_else(malformed)?;
    if direction.is_empty() || to.is_empty() || to.contains('=') {
        return Err(malformed());
    }
    let direction = Direction::from_name(direction).ok_or_else(|| ParseReason::UnknownDirection {
        name: direction.to_owned(),
    })?;
    Ok((direction, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapError;

    fn parse_line(line: &str) -> (Result<(), ParseReason>, CityMap) {
        let mut map = CityMap::new();
        let result = parse_city_line(line, &mut map);
        (result, map)
    }

    // -----------------------------------------------------------------------
    // Writing
    // -----------------------------------------------------------------------

    #[test]
    fn write_empty_map() {
        let mut out = Vec::new();
        assert!(write_map(&mut out, &CityMap::new()).is_ok());
        assert!(out.is_empty());
    }

    #[test]
    fn write_non_empty_map() {
        let mut map = CityMap::new();
        let _ = map.link_cities("aaa", "ddd", Direction::South);
        let _ = map.link_cities("aaa", "eee", Direction::East);
        let _ = map.link_cities("eee", "aaa", Direction::West);
        let _ = map.link_cities("ddd", "aaa", Direction::West);

        let mut out = Vec::new();
        assert!(write_map(&mut out, &map).is_ok());
        assert_eq!(
            String::from_utf8(out).unwrap_or_default(),
            "aaa east=eee south=ddd\nddd west=aaa\neee west=aaa\n"
        );
    }

    #[test]
    fn write_city_without_roads_as_bare_name() {
        let mut map = CityMap::new();
        let _ = map.link_cities("Foo", "Bar", Direction::North);
        assert_eq!(map_to_string(&map), "Bar\nFoo north=Bar\n");
    }

    #[test]
    fn map_to_string_matches_writer() {
        let map = parse_map("Foo north=Bar west=Baz south=Qu-ux\nBar south=Foo west=Bee\n");
        let map = map.unwrap_or_default();
        let mut out = Vec::new();
        let _ = write_map(&mut out, &map);
        assert_eq!(String::from_utf8(out).unwrap_or_default(), map_to_string(&map));
    }

    // -----------------------------------------------------------------------
    // Reading whole maps
    // -----------------------------------------------------------------------

    #[test]
    fn read_empty_input() {
        let map = parse_map("");
        assert!(map.is_ok_and(|m| m.is_empty()));
    }

    #[test]
    fn read_four_cities() {
        let map = parse_map("aaa west=bbb north=ddd\nbbb south=ccc west=aaa");
        assert_eq!(map.map(|m| m.city_count()).ok(), Some(4));
    }

    #[test]
    fn read_tolerates_crlf_and_extra_spaces() {
        let map = parse_map("  Foo   north=Bar\t\r\nBar south=Foo \r\n").unwrap_or_default();
        assert_eq!(map.city_count(), 2);
        assert_eq!(map.road_count(), 2);
    }

    #[test]
    fn read_reports_line_number_and_text() {
        let result = parse_map("aaa west=bbb\nbbb south=bbb");
        match result {
            Err(CodecError::Parse { line, text, reason }) => {
                assert_eq!(line, 2);
                assert_eq!(text, "bbb south=bbb");
                assert!(matches!(reason, ParseReason::Link(MapError::SelfLink { .. })));
            }
            other => assert!(other.is_err(), "expected parse error"),
        }
    }

    #[test]
    fn read_error_message_names_line() {
        let err = parse_map("Foo north=Bar\nFoo up=Baz").err();
        let message = err.map(|e| e.to_string()).unwrap_or_default();
        assert_eq!(message, "invalid line 2 \"Foo up=Baz\": invalid direction name \"up\"");
    }

    #[test]
    fn read_rejects_blank_line_between_cities() {
        let result = parse_map("Foo north=Bar\n\nBar south=Foo\n");
        assert!(matches!(
            result,
            Err(CodecError::Parse {
                line: 2,
                reason: ParseReason::EmptyLine,
                ..
            })
        ));
    }

    #[test]
    fn read_keeps_lines_before_failure() {
        let mut map = CityMap::new();
        let result = read_map("Foo north=Bar\nBaz\n".as_bytes(), &mut map);
        assert!(result.is_err());
        assert_eq!(map.city_count(), 2);
        assert!(map.contains("Foo"));
        assert!(!map.contains("Baz"));
    }

    #[test]
    fn read_surfaces_io_errors() {
        let bad_utf8: &[u8] = &[0x46, 0x6f, 0xff, 0x20, 0x6e];
        let mut map = CityMap::new();
        let result = read_map(bad_utf8, &mut map);
        assert!(matches!(result, Err(CodecError::Io { .. })));
    }

    // -----------------------------------------------------------------------
    // Single lines
    // -----------------------------------------------------------------------

    #[test]
    fn empty_line() {
        let (result, _) = parse_line("");
        assert_eq!(result, Err(ParseReason::EmptyLine));
        let (result, _) = parse_line("   \t ");
        assert_eq!(result, Err(ParseReason::EmptyLine));
    }

    #[test]
    fn city_without_roads() {
        let (result, map) = parse_line("X");
        assert_eq!(result, Err(ParseReason::MissingRoads));
        assert!(map.is_empty());
    }

    #[test]
    fn too_many_roads() {
        let (result, map) = parse_line("a north=b east=c south=d west=e north=f");
        assert_eq!(result, Err(ParseReason::TooManyRoads { count: 5 }));
        assert!(map.is_empty());
    }

    #[test]
    fn invalid_direction_name() {
        let (result, _) = parse_line("aaa top=bbb");
        assert_eq!(
            result,
            Err(ParseReason::UnknownDirection {
                name: String::from("top")
            })
        );
    }

    #[test]
    fn missing_direction_name() {
        let (result, _) = parse_line("aaa =bbb");
        assert!(matches!(result, Err(ParseReason::MalformedRoad { .. })));
    }

    #[test]
    fn missing_neighbor_name() {
        let (result, _) = parse_line("aaa west=");
        assert!(matches!(result, Err(ParseReason::MalformedRoad { .. })));
    }

    #[test]
    fn missing_equals_sign() {
        let (result, _) = parse_line("aaa westbbb");
        assert_eq!(
            result,
            Err(ParseReason::MalformedRoad {
                token: String::from("westbbb")
            })
        );
    }

    #[test]
    fn double_equals_sign() {
        let (result, _) = parse_line("aaa west=bbb=ccc");
        assert!(matches!(result, Err(ParseReason::MalformedRoad { .. })));
    }

    #[test]
    fn one_neighbor() {
        let (result, map) = parse_line("aaa west=bbb");
        assert!(result.is_ok());
        assert_eq!(map.city_count(), 2);
    }

    #[test]
    fn two_neighbors() {
        let (result, map) = parse_line("aaa west=bbb south=ccc");
        assert!(result.is_ok());
        assert_eq!(map.city_count(), 3);
    }

    #[test]
    fn three_neighbors_with_trailing_space() {
        let (result, map) = parse_line("aaa west=bbb south=ccc north=ddd ");
        assert!(result.is_ok());
        assert_eq!(map.city_count(), 4);
    }

    #[test]
    fn neighbor_with_two_directions() {
        let (result, map) = parse_line("aaa west=bbb south=bbb north=ddd ");
        assert!(result.is_ok());
        assert_eq!(map.city_count(), 3);
    }

    #[test]
    fn uppercase_direction_names() {
        let (result, map) = parse_line("aaa WEST=bbb North=ccc");
        assert!(result.is_ok());
        assert_eq!(map.get("aaa").and_then(|c| c.road(Direction::North)), Some("ccc"));
    }

    #[test]
    fn two_neighbors_with_same_direction() {
        let (result, _) = parse_line("aaa west=bbb north=ccc north=ddd ");
        assert!(matches!(
            result,
            Err(ParseReason::Link(MapError::DuplicateDirection { .. }))
        ));
    }

    #[test]
    fn city_link_to_itself() {
        let (result, _) = parse_line("aaa west=bbb south=aaa north=ddd ");
        assert!(matches!(
            result,
            Err(ParseReason::Link(MapError::SelfLink { .. }))
        ));
    }

    #[test]
    fn malformed_token_applies_nothing() {
        let (result, map) = parse_line("aaa west=bbb top=ccc");
        assert!(result.is_err());
        assert!(map.is_empty());
    }
}
