//! `PyPI` JSON API lookup.

use serde::{Deserialize, Serialize};

use crate::{RegistryClient, error::RegistryError};

#[derive(Deserialize)]
struct PyPiResponse {
    info: PyPiInfo,
}

#[derive(Deserialize)]
struct PyPiInfo {
    name: String,
    version: String,
    summary: Option<String>,
}

/// Normalized package metadata from the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub summary: String,
}

impl From<PyPiResponse> for PackageInfo {
    fn from(resp: PyPiResponse) -> Self {
        Self {
            name: resp.info.name,
            version: resp.info.version,
            summary: resp.info.summary.unwrap_or_default(),
        }
    }
}

impl RegistryClient {
    /// Look up a package on the index by exact name.
    ///
    /// Returns `None` if the package does not exist (404).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the HTTP request fails or times out,
    /// the index returns a non-success status, or the response cannot be
    /// parsed.
    pub async fn lookup(&self, package: &str) -> Result<Option<PackageInfo>, RegistryError> {
        let url = format!(
            "{}/{}/json",
            self.index_url(),
            urlencoding::encode(package)
        );
        let resp = self.http.get(&url).send().await?;

        if resp.status() == 404 {
            return Ok(None);
        }
        if resp.status() == 429 {
            let retry_after = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(RegistryError::RateLimited {
                retry_after_secs: retry_after,
            });
        }
        if !resp.status().is_success() {
            return Err(RegistryError::Api {
                status: resp.status().as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let data: PyPiResponse = resp.json().await?;
        Ok(Some(data.into()))
    }

    /// Whether the index knows an exact package name.
    ///
    /// # Errors
    ///
    /// Propagates [`RegistryError`] from [`lookup`](Self::lookup).
    pub async fn exists(&self, package: &str) -> Result<bool, RegistryError> {
        let found = self.lookup(package).await?;
        if let Some(ref info) = found {
            tracing::debug!(package = %info.name, version = %info.version, "found on index");
        }
        Ok(found.is_some())
    }
}
