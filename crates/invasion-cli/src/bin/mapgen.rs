//! `mapgen` binary: writes a random map that `alien-invasion` can read.

#![allow(clippy::print_stderr)]

use std::process::ExitCode;

use clap::Parser;
use invasion_cli::args::MapgenArgs;
use invasion_cli::{generate, logging};

fn main() -> ExitCode {
    let args = MapgenArgs::parse();
    logging::init(logging::DEFAULT_LEVEL);

    match generate::execute(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
