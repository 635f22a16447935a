pub mod audit;
pub mod search;

use std::path::{Path, PathBuf};

use mrd_config::{ConfigError, MrdConfig};

/// Resolve the database path from an explicit `--file` override or the
/// configuration's default entry. Absence of both is fatal.
pub fn resolve_database_path(
    file: Option<&Path>,
    config: &MrdConfig,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = file {
        return Ok(path.to_path_buf());
    }
    config
        .database
        .path
        .clone()
        .ok_or(ConfigError::NoDatabasePath)
}
