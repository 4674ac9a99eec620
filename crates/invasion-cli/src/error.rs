//! Error types for the command-line tools.
//!
//! [`CliError`] wraps every failure either binary can hit, so `main` has a
//! single error to print before exiting.

use std::path::PathBuf;

/// Top-level error for the command-line tools.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: invasion_core::ConfigError,
    },

    /// The invasion could not be run.
    #[error("{source}")]
    Invasion {
        /// The underlying pipeline error.
        #[from]
        source: invasion_core::InvasionError,
    },

    /// Random map generation failed.
    #[error("map generation failed: {source}")]
    Generator {
        /// The underlying generator error.
        #[from]
        source: invasion_world::GeneratorError,
    },

    /// A file could not be opened or created.
    #[error("cannot open {}: {source}", path.display())]
    File {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Writing to the output failed.
    #[error("failed to write output: {source}")]
    Output {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The run report could not be written.
    #[error("failed to write report: {source}")]
    Report {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// The argument is out of the supported range.
    #[error("{message}")]
    Usage {
        /// What is wrong with the arguments.
        message: String,
    },
}

impl CliError {
    /// Wrap an I/O error with the path it happened on.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}
