use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures that abort the whole batch. Individual unsolvable puzzles are not
/// errors; they are counted and the run continues.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Failed to read the puzzle collection from '{path}': {source}")]
    InputRead { path: PathBuf, source: io::Error },

    #[error("Malformed puzzle collection: {0}")]
    MalformedInput(String),

    #[error("Failed to write the solved collection to '{path}': {source}")]
    OutputWrite { path: PathBuf, source: io::Error },
}
