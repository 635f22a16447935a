//! The package existence oracle.
//!
//! Determines which discovered top-level modules are actually available:
//! first a local import probe, then a package-index lookup as a secondary
//! signal when the import fails. Explicitly best-effort: a lookup failure or
//! timeout for one module is logged and treated as "not confirmed" rather
//! than aborting the remaining lookups.

use std::collections::BTreeSet;
use std::time::Duration;

use thiserror::Error;

use crate::probe::{ImportProbe, ProbeError};

/// A package-index lookup failure, normalized for the oracle.
#[derive(Debug, Clone, Error)]
#[error("package index lookup failed: {0}")]
pub struct IndexError(pub String);

impl From<mrd_registry::RegistryError> for IndexError {
    fn from(error: mrd_registry::RegistryError) -> Self {
        Self(error.to_string())
    }
}

/// The external package index consumed by the oracle.
pub trait PackageIndex {
    /// Whether the index knows an exact package name.
    async fn exists(&self, package: &str) -> Result<bool, IndexError>;
}

impl PackageIndex for mrd_registry::RegistryClient {
    async fn exists(&self, package: &str) -> Result<bool, IndexError> {
        Ok(self.lookup(package).await?.is_some())
    }
}

/// Confirms module availability for the import pass.
pub struct ExistenceOracle<'a, I, P> {
    index: &'a I,
    probe: &'a P,
    lookup_timeout: Duration,
}

impl<'a, I: PackageIndex, P: ImportProbe> ExistenceOracle<'a, I, P> {
    #[must_use]
    pub const fn new(index: &'a I, probe: &'a P, lookup_timeout: Duration) -> Self {
        Self {
            index,
            probe,
            lookup_timeout,
        }
    }

    /// Return the subset of `modules` confirmed available.
    ///
    /// A module is confirmed if it imports locally, or failing that, if the
    /// package index knows it. Errors and timeouts demote a module to "not
    /// confirmed"; they never abort the remaining lookups.
    pub async fn confirm(&self, modules: &BTreeSet<String>) -> BTreeSet<String> {
        let mut confirmed = BTreeSet::new();

        for module in modules {
            if self.confirm_one(module).await {
                confirmed.insert(module.clone());
            }
        }

        confirmed
    }

    async fn confirm_one(&self, module: &str) -> bool {
        match self.probe.import_module(module).await {
            Ok(()) => {
                tracing::info!(module, "module imports locally");
                return true;
            }
            Err(ProbeError::NotFound(reason)) => {
                tracing::debug!(module, %reason, "local import failed, consulting index");
            }
            Err(error) => {
                tracing::warn!(module, %error, "local import probe errored, consulting index");
            }
        }

        match tokio::time::timeout(self.lookup_timeout, self.index.exists(module)).await {
            Ok(Ok(true)) => {
                tracing::info!(module, "module found on package index");
                true
            }
            Ok(Ok(false)) => {
                tracing::info!(module, "module does not exist on package index");
                false
            }
            Ok(Err(error)) => {
                tracing::warn!(module, %error, "index lookup failed, treating as not confirmed");
                false
            }
            Err(_) => {
                tracing::warn!(
                    module,
                    timeout_secs = self.lookup_timeout.as_secs(),
                    "index lookup timed out, treating as not confirmed"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fixtures::{SlowIndex, StaticIndex, StaticProbe, UnconfirmedIndex};

    fn modules(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn locally_importable_modules_skip_the_index() {
        let index = UnconfirmedIndex;
        let probe = StaticProbe::importable(&["ophyd"]);
        let oracle = ExistenceOracle::new(&index, &probe, Duration::from_secs(1));

        let confirmed = oracle.confirm(&modules(&["ophyd"])).await;
        assert_eq!(confirmed, modules(&["ophyd"]));
    }

    #[tokio::test]
    async fn index_confirms_what_the_probe_cannot() {
        let index = StaticIndex::with(&["pcdsdevices"]);
        let probe = StaticProbe::importable(&[]);
        let oracle = ExistenceOracle::new(&index, &probe, Duration::from_secs(1));

        let confirmed = oracle
            .confirm(&modules(&["pcdsdevices", "missingmod"]))
            .await;
        assert_eq!(confirmed, modules(&["pcdsdevices"]));
    }

    #[tokio::test]
    async fn lookup_timeout_demotes_to_not_confirmed() {
        let index = SlowIndex::new(Duration::from_secs(30));
        let probe = StaticProbe::importable(&[]);
        let oracle = ExistenceOracle::new(&index, &probe, Duration::from_millis(20));

        let confirmed = oracle.confirm(&modules(&["x", "y"])).await;
        assert!(confirmed.is_empty());
    }
}
