//! # mrd-store
//!
//! Read-only access to a device database stored as a JSON file.
//!
//! The on-disk shape is a single object mapping record names to field maps:
//!
//! ```json
//! { "im3l0": { "name": "im3l0", "type": "OphydItem", ... }, ... }
//! ```
//!
//! The store loads the whole database eagerly; the audit pipeline treats it
//! as an externally-owned, read-only collection for the duration of a run.

mod error;

pub use error::StoreError;

use std::fs;
use std::path::{Path, PathBuf};

use globset::Glob;
use mrd_core::Record;
use serde_json::Value;

/// An opened record database.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<Record>,
}

impl RecordStore {
    /// Load every record from a database file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the path is not a regular file, cannot be
    /// read, is not valid JSON, or is not an object of record objects.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.is_file() {
            return Err(StoreError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Value = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let Value::Object(entries) = document else {
            return Err(StoreError::BadShape {
                path: path.to_path_buf(),
            });
        };

        let mut records = Vec::with_capacity(entries.len());
        for (alias, entry) in entries {
            match entry {
                Value::Object(fields) => records.push(Record::new(fields)),
                other => {
                    tracing::warn!(%alias, kind = kind_of(&other), "skipping non-object entry");
                }
            }
        }

        tracing::debug!(path = %path.display(), count = records.len(), "database loaded");
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full record collection, in stored order.
    #[must_use]
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    /// Look up one record by its `name` field.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.name() == Some(name))
    }

    /// Records whose fields match every `(field, glob)` criterion.
    ///
    /// Non-string field values are matched against their JSON rendition, so
    /// `channel=1*` matches a numeric channel of 12.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPattern`] for an unparseable glob.
    pub fn search(&self, criteria: &[(String, String)]) -> Result<Vec<&Record>, StoreError> {
        let mut matchers = Vec::with_capacity(criteria.len());
        for (field, pattern) in criteria {
            let glob = Glob::new(pattern).map_err(|source| StoreError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            matchers.push((field.as_str(), glob.compile_matcher()));
        }

        Ok(self
            .records
            .iter()
            .filter(|record| {
                matchers.iter().all(|(field, matcher)| {
                    record.get(field).is_some_and(|value| match value {
                        Value::String(text) => matcher.is_match(text),
                        other => matcher.is_match(other.to_string()),
                    })
                })
            })
            .collect())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
