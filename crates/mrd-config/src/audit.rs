//! Audit pipeline configuration.

use serde::{Deserialize, Serialize};

const fn default_probe_timeout_secs() -> u64 {
    10
}

fn default_python() -> String {
    "python3".to_string()
}

fn default_index_url() -> String {
    "https://pypi.org/pypi".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Per-lookup bound for import probes and package-index queries.
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Interpreter used for local import and construction probes.
    #[serde(default = "default_python")]
    pub python: String,

    /// Base URL of the package index consulted when a local import fails.
    #[serde(default = "default_index_url")]
    pub index_url: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: default_probe_timeout_secs(),
            python: default_python(),
            index_url: default_index_url(),
        }
    }
}
