//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while opening or querying a record database.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database path does not point at a regular file.
    #[error("database path '{path}' is not a regular file")]
    NotAFile { path: PathBuf },

    /// The database file could not be read.
    #[error("failed to read database '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The database file is not valid JSON.
    #[error("failed to parse database '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The database top level is not an object of record objects.
    #[error("database '{path}' is not an object of record entries")]
    BadShape { path: PathBuf },

    /// A search criterion's glob pattern did not parse.
    #[error("invalid search pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
