//! Errors surfaced by save-file loading.

use std::path::PathBuf;

use thiserror::Error;

/// Why a save file could not be applied.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Save file location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid snapshot document.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Save file location.
        path: PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// The document parsed but does not describe a state this game can hold.
    #[error("save {path} does not match this game: {reason}")]
    Schema {
        /// Save file location.
        path: PathBuf,
        /// First mismatch found.
        reason: String,
    },
}

/// Result alias for load operations.
pub type SaveResult<T> = Result<T, SaveError>;
