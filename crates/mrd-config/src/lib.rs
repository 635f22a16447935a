//! # mrd-config
//!
//! Layered configuration loading for Meridian using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MERIDIAN_*` prefix, `__` as separator)
//! 2. An explicit config file passed on the command line
//! 3. A config file named by `MERIDIAN_CONFIG`
//! 4. Project-level `.meridian/config.toml`
//! 5. User-level `~/.config/meridian/config.toml`
//! 6. Built-in defaults
//!
//! Figment maps `MERIDIAN_DATABASE__PATH` -> `database.path`,
//! `MERIDIAN_AUDIT__PROBE_TIMEOUT_SECS` -> `audit.probe_timeout_secs`, etc.

mod audit;
mod database;
mod error;

pub use audit::AuditConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MrdConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

impl MrdConfig {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any layer fails to parse or extract.
    pub fn load(explicit_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(explicit_file).extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` before building the figment. This is the typical
    /// entry point for the CLI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any layer fails to parse or extract.
    pub fn load_with_dotenv(explicit_file: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(explicit_file)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment(explicit_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".meridian/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Ok(env_file) = std::env::var("MERIDIAN_CONFIG") {
            figment = figment.merge(Toml::file(env_file));
        }

        if let Some(explicit) = explicit_file {
            figment = figment.merge(Toml::file(explicit));
        }

        figment.merge(Env::prefixed("MERIDIAN_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("meridian").join("config.toml"))
    }
}
