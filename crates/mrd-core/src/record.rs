//! The device record model.
//!
//! A record is one entry in the audited database: a mapping from field name
//! to JSON value. Records are created by the store and are read-only from the
//! validation pipeline's perspective.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata keys the backend maintains on every record. These are never
/// declared by a container schema and never count as extra attributes.
pub const RESERVED_KEYS: &[&str] = &["creation", "last_edit", "_id", "type"];

/// One entry in the device database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Raw field lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The record's identifier, if one was stored.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    /// Identifier for log lines; unnamed records still need a label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name().unwrap_or("<unnamed>")
    }

    /// Declared container type, if present and non-empty.
    #[must_use]
    pub fn container(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    /// Declared dotted executable-class path, if present and non-empty.
    #[must_use]
    pub fn device_class(&self) -> Option<&str> {
        self.get("device_class")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Positional constructor arguments; absent or malformed becomes empty.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        self.get("args").and_then(Value::as_array).map_or(&[], Vec::as_slice)
    }

    /// Keyword constructor arguments; absent or malformed becomes empty.
    #[must_use]
    pub fn kwargs(&self) -> Option<&Map<String, Value>> {
        self.get("kwargs").and_then(Value::as_object)
    }

    /// All field keys present on the record, in stored order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}
