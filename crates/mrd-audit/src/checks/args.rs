//! Constructor argument resolution.
//!
//! Each positional or keyword argument is either a literal or a template
//! string referencing sibling fields of the same record. Resolution is the
//! pure expansion from `mrd_core::template`; attempting construction with
//! the result is the pipeline's concern, so substitution failures stay
//! attributable separately from construction failures.

use mrd_core::{Record, fill_template};
use serde_json::{Map, Value};

/// The fully resolved argument list and keyword mapping for one record,
/// plus the substitutions that failed along the way. A failure on one
/// argument never aborts resolution of the rest.
#[derive(Debug, Default)]
pub struct ResolvedArguments {
    pub args: Vec<Value>,
    pub kwargs: Map<String, Value>,
    pub failures: Vec<String>,
}

impl ResolvedArguments {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resolve a record's `args` and `kwargs` against its own field values.
#[must_use]
pub fn resolve_arguments(record: &Record) -> ResolvedArguments {
    let mut resolved = ResolvedArguments::default();

    for (position, arg) in record.args().iter().enumerate() {
        match resolve_one(record, arg) {
            Ok(value) => resolved.args.push(value),
            Err(reason) => {
                let failure = format!("args[{position}]: {reason}");
                tracing::warn!(device = record.label(), %failure, "argument substitution failed");
                resolved.failures.push(failure);
            }
        }
    }

    if let Some(kwargs) = record.kwargs() {
        for (key, value) in kwargs {
            match resolve_one(record, value) {
                Ok(value) => {
                    resolved.kwargs.insert(key.clone(), value);
                }
                Err(reason) => {
                    let failure = format!("kwargs[{key}]: {reason}");
                    tracing::warn!(device = record.label(), %failure, "argument substitution failed");
                    resolved.failures.push(failure);
                }
            }
        }
    }

    resolved
}

/// Template strings expand with type coercion; everything else passes
/// through unchanged.
fn resolve_one(record: &Record, value: &Value) -> Result<Value, String> {
    match value {
        Value::String(template) => {
            fill_template(template, record, true).map_err(|error| error.to_string())
        }
        other => Ok(other.clone()),
    }
}
