//! `alien-invasion` binary.
//!
//! Reads a map, lands `-n` aliens on distinct random cities, lets them
//! wander until they are all dead or out of moves, and prints the cities
//! that are left.
//!
//! # Startup Sequence
//!
//! 1. Parse arguments
//! 2. Load configuration (`-c`, else `invasion-config.yaml`, else defaults)
//! 3. Initialize logging on stderr
//! 4. Run the invasion and write the surviving map

#![allow(clippy::print_stderr)]

use std::process::ExitCode;

use clap::Parser;
use invasion_cli::args::InvadeArgs;
use invasion_cli::{invade, logging};

fn main() -> ExitCode {
    let args = InvadeArgs::parse();

    let config = match invade::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logging::init(logging::DEFAULT_LEVEL);
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.logging.level);

    match invade::execute(&args, config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
