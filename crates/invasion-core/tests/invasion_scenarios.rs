//! End-to-end invasion runs through [`run_invasion`].
//!
//! Each test feeds a map as text, runs the whole pipeline with a seeded
//! generator, and checks the written map and the narration.

#![allow(clippy::unwrap_used)]

use std::io::Write;

use invasion_core::{
    InvasionConfig, InvasionError, NarrationObserver, RunSettings, ScenarioError, SimulationSummary,
    run_invasion,
};
use invasion_world::{CodecError, ParseReason, generate_map, map_to_string, parse_map};
use rand::SeedableRng;
use rand::rngs::StdRng;

struct Outcome {
    result: Result<SimulationSummary, InvasionError>,
    map: String,
    narration: String,
}

fn invade(input: &str, settings: RunSettings, seed: u64) -> Outcome {
    let mut out = Vec::new();
    let mut narrator = NarrationObserver::new(Vec::new());
    let result = run_invasion(
        input.as_bytes(),
        &mut out,
        settings,
        StdRng::seed_from_u64(seed),
        &mut narrator,
    );
    Outcome {
        result,
        map: String::from_utf8(out).unwrap(),
        narration: String::from_utf8(narrator.into_inner()).unwrap(),
    }
}

#[test]
fn two_aliens_on_two_cities_always_collide() {
    for seed in 0..50 {
        let outcome = invade("A north=B\nB south=A\n", RunSettings::new(2), seed);
        let summary = outcome.result.unwrap();

        // Whoever moves first walks into the other alien.
        assert_eq!(summary.rounds, 1, "seed {seed}");
        assert_eq!(summary.cities_destroyed(), 1, "seed {seed}");
        assert!(summary.survivors.is_empty(), "seed {seed}");
        assert!(
            outcome.map == "A\n" || outcome.map == "B\n",
            "seed {seed}: {:?}",
            outcome.map
        );
        assert!(
            outcome.narration == "A has been destroyed by alien 1 and alien 2\n"
                || outcome.narration == "A has been destroyed by alien 2 and alien 1\n"
                || outcome.narration == "B has been destroyed by alien 1 and alien 2\n"
                || outcome.narration == "B has been destroyed by alien 2 and alien 1\n",
            "seed {seed}: {:?}",
            outcome.narration
        );
        // The surviving city is the one that was not destroyed.
        let destroyed = summary.destroyed.first().map(|e| e.city.clone()).unwrap();
        assert_eq!(outcome.map.trim_end(), if destroyed == "A" { "B" } else { "A" });
    }
}

#[test]
fn one_alien_never_destroys_anything() {
    for seed in 0..10 {
        let outcome = invade("Foo north=Bar\nBar south=Foo\n", RunSettings::new(1), seed);
        let summary = outcome.result.unwrap();
        assert_eq!(outcome.map, "Bar south=Foo\nFoo north=Bar\n");
        assert!(outcome.narration.is_empty());
        assert_eq!(summary.total_moves, 10_000);
        assert_eq!(summary.cities_remaining, 2);
    }
}

#[test]
fn roadless_city_declaration_rejected() {
    let outcome = invade("X\n", RunSettings::new(1), 1);
    assert!(matches!(
        outcome.result,
        Err(InvasionError::Map {
            source: CodecError::Parse {
                line: 1,
                reason: ParseReason::MissingRoads,
                ..
            }
        })
    ));
    assert!(outcome.map.is_empty());
    assert!(outcome.narration.is_empty());
}

#[test]
fn unknown_direction_reports_line() {
    let outcome = invade("Foo north=Bar\nBar up=Foo\n", RunSettings::new(1), 1);
    let message = outcome.result.err().map(|e| e.to_string()).unwrap();
    assert_eq!(
        message,
        "failed to load map: invalid line 2 \"Bar up=Foo\": invalid direction name \"up\""
    );
}

#[test]
fn too_many_aliens_for_any_map() {
    for cities in 2..12 {
        let map = generate_map(&mut StdRng::seed_from_u64(cities), usize::try_from(cities).unwrap())
            .unwrap();
        let aliens = u32::try_from(cities).unwrap().saturating_add(1);
        let outcome = invade(&map_to_string(&map), RunSettings::new(aliens), 3);
        assert!(matches!(
            outcome.result,
            Err(InvasionError::Scenario {
                source: ScenarioError::TooManyAliens { .. }
            })
        ));
        assert!(outcome.map.is_empty());
    }
}

#[test]
fn same_seed_same_output() {
    let map = generate_map(&mut StdRng::seed_from_u64(21), 60).unwrap();
    let input = map_to_string(&map);

    let first = invade(&input, RunSettings::new(40), 1234);
    let second = invade(&input, RunSettings::new(40), 1234);

    assert_eq!(first.map, second.map);
    assert_eq!(first.narration, second.narration);
    assert_eq!(first.result.unwrap(), second.result.unwrap());
}

#[test]
fn output_is_a_valid_map_with_no_destroyed_cities() {
    let map = generate_map(&mut StdRng::seed_from_u64(5), 80).unwrap();
    let outcome = invade(&map_to_string(&map), RunSettings::new(50), 99);
    let summary = outcome.result.unwrap();

    // Every line names a city that survived; roads only lead to survivors.
    let survivors: Vec<&str> = outcome
        .map
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(survivors.len(), summary.cities_remaining);
    let destinations: Vec<&str> = outcome
        .map
        .split_whitespace()
        .filter_map(|token| token.split_once('=').map(|(_, to)| to))
        .collect();
    for event in &summary.destroyed {
        assert!(!survivors.contains(&event.city.as_str()));
        assert!(!destinations.contains(&event.city.as_str()));
    }
    assert_eq!(outcome.narration.lines().count(), summary.cities_destroyed());

    // Cities with roads round-trip through the reader.
    let with_roads: String = outcome
        .map
        .lines()
        .filter(|line| line.contains('='))
        .map(|line| format!("{line}\n"))
        .collect();
    assert!(parse_map(&with_roads).is_ok());
}

#[test]
fn configured_move_budget_limits_the_run() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "simulation:\n  max_moves: 7\n  seed: 3").unwrap();
    let config = InvasionConfig::from_file(file.path()).unwrap();

    let outcome = invade(
        "Foo north=Bar\nBar south=Foo\n",
        RunSettings::from_config(1, &config),
        config.simulation.seed.unwrap_or_default(),
    );
    let summary = outcome.result.unwrap();
    assert_eq!(summary.max_moves, 7);
    assert_eq!(summary.rounds, 7);
    assert_eq!(summary.total_moves, 7);
}

#[test]
fn summary_serializes_to_json() {
    let outcome = invade("A north=B\nB south=A\n", RunSettings::new(2), 17);
    let summary = outcome.result.unwrap();
    let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["aliens"], 2);
    assert_eq!(json["rounds"], 1);
    assert_eq!(json["cities_remaining"], 1);
    assert_eq!(json["destroyed"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["survivors"].as_array().map(Vec::len), Some(0));
}
