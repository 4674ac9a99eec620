//! The `alien-invasion` command.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use invasion_core::{
    InvasionConfig, InvasionObserver, NarrationObserver, NoOpObserver, RunSettings,
    SimulationSummary, TracingObserver, run_invasion,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;

use crate::args::InvadeArgs;
use crate::error::CliError;

/// Config file picked up from the working directory when `-c` is absent.
pub const DEFAULT_CONFIG_PATH: &str = "invasion-config.yaml";

/// Contents of the `--report` file.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// Seed the run used; pass it to `--seed` to replay the run.
    pub seed: u64,
    /// What happened.
    #[serde(flatten)]
    pub summary: &'a SimulationSummary,
}

/// Load the config named by `-c`, or the default file if it exists, or
/// the built-in defaults.
///
/// # Errors
///
/// Returns [`CliError::Config`] if the chosen file cannot be read or
/// parsed.
pub fn load_config(path: Option<&Path>) -> Result<InvasionConfig, CliError> {
    if let Some(path) = path {
        return Ok(InvasionConfig::from_file(path)?);
    }
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        Ok(InvasionConfig::from_file(default_path)?)
    } else {
        let mut config = InvasionConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}

/// Fold command-line flags into the loaded config.
pub fn apply_args(config: &mut InvasionConfig, args: &InvadeArgs) {
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
    }
    if let Some(max_moves) = args.max_moves {
        config.simulation.max_moves = max_moves;
    }
}

/// Run the invasion described by `args` under `config`.
///
/// The surviving map is written to `-o` or stdout. With narration enabled,
/// each destroyed city is announced on stderr.
///
/// # Errors
///
/// Returns [`CliError::File`] if a file cannot be opened,
/// [`CliError::Invasion`] if the map is invalid or has too few cities, and
/// [`CliError::Report`] or [`CliError::Output`] if the report cannot be
/// written.
pub fn execute(args: &InvadeArgs, mut config: InvasionConfig) -> Result<SimulationSummary, CliError> {
    apply_args(&mut config, args);
    config.validate()?;

    let seed = config.simulation.seed.unwrap_or_else(rand::random);
    info!(
        seed,
        aliens = args.aliens,
        max_moves = config.simulation.max_moves,
        map = %args.map.display(),
        "configuration loaded"
    );

    let input = File::open(&args.map).map_err(|e| CliError::file(&args.map, e))?;
    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|e| CliError::file(path, e))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut observer: Box<dyn InvasionObserver> = if config.logging.narrate {
        Box::new((TracingObserver, NarrationObserver::new(io::stderr())))
    } else {
        Box::new((TracingObserver, NoOpObserver))
    };

    let summary = run_invasion(
        BufReader::new(input),
        &mut *output,
        RunSettings::from_config(args.aliens, &config),
        StdRng::seed_from_u64(seed),
        &mut *observer,
    )?;

    if let Some(path) = &args.report {
        let file = File::create(path).map_err(|e| CliError::file(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &RunReport { seed, summary: &summary })?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    Ok(summary)
}
