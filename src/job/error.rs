//! Job error types.

use super::config::ConfigError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running a job.
///
/// Nothing is retried. Every failure reaches the caller, and a run that fails
/// after claiming its output directory leaves that directory without a
/// commit marker.
#[derive(Debug, Error)]
pub enum JobError {
    /// Output location existed before the run; nothing was written
    #[error("Output directory '{}' already exists. Aborting to avoid data loss", path.display())]
    OutputExists { path: PathBuf },

    #[error("Failed to list input directory '{}'", path.display())]
    ListInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read input file '{}'", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create output directory '{}'", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{}'", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid job configuration: {}", summarize(errors))]
    InvalidConfig { errors: Vec<ConfigError> },
}

fn summarize(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
