//! # mrd-registry
//!
//! HTTP client for the external package index consulted by the audit
//! pipeline when a module cannot be imported locally.
//!
//! `PyPI` deprecated its XML-RPC search endpoint; this client performs
//! direct package lookup via `{index_url}/{name}/json`, which is exactly
//! what the existence oracle needs — the audited records reference modules
//! by exact top-level name.

mod error;
mod pypi;

pub use error::RegistryError;
pub use pypi::PackageInfo;

use std::time::Duration;

/// HTTP client for package-index lookups.
pub struct RegistryClient {
    http: reqwest::Client,
    index_url: String,
}

impl RegistryClient {
    pub const DEFAULT_INDEX_URL: &'static str = "https://pypi.org/pypi";

    /// Create a client against a specific index base URL.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(index_url: &str, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("meridian/0.1")
                .timeout(timeout)
                .build()
                .expect("reqwest client should build"),
            index_url: index_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn index_url(&self) -> &str {
        &self.index_url
    }
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INDEX_URL, Duration::from_secs(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        let client = RegistryClient::new("https://pypi.org/pypi/", Duration::from_secs(1));
        assert_eq!(client.index_url(), "https://pypi.org/pypi");
    }

    #[test]
    fn registry_client_default() {
        let client = RegistryClient::default();
        assert_eq!(client.index_url(), RegistryClient::DEFAULT_INDEX_URL);
    }
}
