//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// No database path was supplied or configured.
    #[error("no database path: pass --file or set database.path in the configuration")]
    NoDatabasePath,
}
