use std::path::PathBuf;
use thiserror::Error;

/// Why a single file could not be wrapped.
///
/// None of these abort a run: the engine records the error against the file
/// and moves on to the next one.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file not found: {0}")]
    MissingFile(PathBuf),

    #[error("no anchor found")]
    NoRegionFound,

    #[error("unbalanced delimiters after anchor at byte {anchor}")]
    UnbalancedDelimiters { anchor: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
