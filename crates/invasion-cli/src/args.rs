//! Command-line arguments for both binaries.

use std::path::PathBuf;

use clap::Parser;

/// Run an alien invasion on a map and print the surviving cities.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "alien-invasion")]
#[command(author, version, about, long_about = None)]
pub struct InvadeArgs {
    /// Map file, one city per line: `Foo north=Bar west=Baz`
    #[arg(short = 'f', long = "map", value_name = "PATH")]
    pub map: PathBuf,

    /// Number of aliens invading the map
    #[arg(short = 'n', long, value_name = "INT", value_parser = clap::value_parser!(u32).range(1..))]
    pub aliens: u32,

    /// Output file for the surviving map (default: stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// YAML config file (default: invasion-config.yaml, if present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Random seed (default: from config, else random)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Moves each alien may make (default: from config, else 10000)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_moves: Option<u32>,

    /// Write a JSON summary of the run to this file
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Build a random map for alien-invasion.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "mapgen")]
#[command(author, version, about, long_about = None)]
pub struct MapgenArgs {
    /// Number of cities
    #[arg(short = 'n', long, value_name = "INT", value_parser = clap::value_parser!(u64).range(1..))]
    pub cities: u64,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Random seed (default: random)
    #[arg(long)]
    pub seed: Option<u64>,
}
