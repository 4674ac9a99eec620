//! The `mapgen` command.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use invasion_world::{CityMap, generate_map, write_map};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::args::MapgenArgs;
use crate::error::CliError;

/// Generate the map described by `args` and write it to `-o` or stdout.
///
/// Returns the generated map.
///
/// # Errors
///
/// Returns [`CliError::Generator`] for fewer than two cities,
/// [`CliError::File`] if the output file cannot be created, and
/// [`CliError::Output`] if writing fails.
pub fn execute(args: &MapgenArgs) -> Result<CityMap, CliError> {
    let cities = usize::try_from(args.cities).map_err(|error| CliError::Usage {
        message: format!("too many cities ({}): {error}", args.cities),
    })?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, cities, "generating map");

    let map = generate_map(&mut StdRng::seed_from_u64(seed), cities)?;

    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|e| CliError::file(path, e))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    write_map(&mut *output, &map)?;
    output.flush()?;
    Ok(map)
}
