//! Deterministic stand-ins for the package index and the import probe.
//!
//! Live index queries are fragile and rate-limited, and import probes
//! depend on the local interpreter, so both sit behind traits with these
//! swappable implementations for tests and offline runs.

use std::collections::BTreeSet;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::oracle::{IndexError, PackageIndex};
use crate::probe::{ImportProbe, ProbeError};

/// An index with a fixed set of known packages.
pub struct StaticIndex {
    available: BTreeSet<String>,
}

impl StaticIndex {
    #[must_use]
    pub fn with(packages: &[&str]) -> Self {
        Self {
            available: packages.iter().map(ToString::to_string).collect(),
        }
    }
}

impl PackageIndex for StaticIndex {
    async fn exists(&self, package: &str) -> Result<bool, IndexError> {
        Ok(self.available.contains(package))
    }
}

/// An index that knows nothing; the "always unconfirmed" swap-in.
pub struct UnconfirmedIndex;

impl PackageIndex for UnconfirmedIndex {
    async fn exists(&self, _package: &str) -> Result<bool, IndexError> {
        Ok(false)
    }
}

/// An index whose every lookup errors, for failure-path tests.
pub struct FailingIndex;

impl PackageIndex for FailingIndex {
    async fn exists(&self, package: &str) -> Result<bool, IndexError> {
        Err(IndexError(format!("synthetic failure for '{package}'")))
    }
}

/// An index that stalls long enough to trip any reasonable timeout.
pub struct SlowIndex {
    delay: Duration,
}

impl SlowIndex {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl PackageIndex for SlowIndex {
    async fn exists(&self, _package: &str) -> Result<bool, IndexError> {
        tokio::time::sleep(self.delay).await;
        Ok(true)
    }
}

/// A probe with a fixed set of importable modules and dotted paths.
///
/// A dotted path resolves when its top-level module is importable and the
/// full path was listed. Construction succeeds for resolvable paths unless
/// the path was marked unconstructible.
pub struct StaticProbe {
    modules: BTreeSet<String>,
    paths: BTreeSet<String>,
    unconstructible: BTreeSet<String>,
}

impl StaticProbe {
    /// Probe where only the given top-level modules import.
    #[must_use]
    pub fn importable(modules: &[&str]) -> Self {
        Self {
            modules: modules.iter().map(ToString::to_string).collect(),
            paths: BTreeSet::new(),
            unconstructible: BTreeSet::new(),
        }
    }

    /// Also resolve these full dotted paths.
    #[must_use]
    pub fn with_paths(mut self, paths: &[&str]) -> Self {
        self.paths = paths.iter().map(ToString::to_string).collect();
        self
    }

    /// Mark paths whose construction raises.
    #[must_use]
    pub fn failing_construction(mut self, paths: &[&str]) -> Self {
        self.unconstructible = paths.iter().map(ToString::to_string).collect();
        self
    }
}

impl ImportProbe for StaticProbe {
    async fn import_module(&self, module: &str) -> Result<(), ProbeError> {
        if self.modules.contains(module) {
            Ok(())
        } else {
            Err(ProbeError::NotFound(format!("no module named '{module}'")))
        }
    }

    async fn import_path(&self, class_path: &str) -> Result<(), ProbeError> {
        if self.paths.contains(class_path) {
            Ok(())
        } else {
            Err(ProbeError::NotFound(format!(
                "cannot resolve '{class_path}'"
            )))
        }
    }

    async fn construct(
        &self,
        class_path: &str,
        _args: &[Value],
        _kwargs: &Map<String, Value>,
    ) -> Result<(), ProbeError> {
        self.import_path(class_path).await?;
        if self.unconstructible.contains(class_path) {
            return Err(ProbeError::Failed(format!(
                "constructor raised for '{class_path}'"
            )));
        }
        Ok(())
    }
}
