//! Extra-attribute detection.

use std::collections::BTreeSet;

use mrd_core::{RESERVED_KEYS, Record, ReportCode, SchemaRegistry};

/// Flag fields present on a record but declared neither by its schema nor
/// by the reserved metadata set. `Missing` if the schema cannot be
/// resolved; `Extras` for a non-empty difference; `Success` otherwise.
#[must_use]
pub fn detect_extras(record: &Record, registry: &SchemaRegistry) -> ReportCode {
    let device = record.label();
    let Some(schema) = record.container().and_then(|name| registry.get(name)) else {
        tracing::warn!(device, "record is missing a resolvable container");
        return ReportCode::Missing;
    };

    let declared = schema.declared_keys();
    let extras: BTreeSet<&str> = record
        .keys()
        .filter(|key| !declared.contains(key) && !RESERVED_KEYS.contains(key))
        .collect();

    if extras.is_empty() {
        ReportCode::Success
    } else {
        tracing::warn!(device, ?extras, "record has extra attributes");
        ReportCode::Extras
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn declared_and_reserved_keys_are_not_extras() {
        let registry = SchemaRegistry::new();
        let rec = record(json!({
            "name": "im3l0",
            "type": "OphydItem",
            "device_class": "ophyd.sim.SynAxis",
            "creation": "2024-01-09",
            "last_edit": "2024-03-02",
            "_id": "im3l0",
        }));
        assert_eq!(detect_extras(&rec, &registry), ReportCode::Success);
    }

    #[test]
    fn undeclared_field_is_flagged() {
        let registry = SchemaRegistry::new();
        let rec = record(json!({
            "name": "im3l0",
            "type": "OphydItem",
            "extra_field": 1,
        }));
        assert_eq!(detect_extras(&rec, &registry), ReportCode::Extras);
    }

    #[test]
    fn adding_reserved_keys_never_changes_the_result() {
        let registry = SchemaRegistry::new();
        let base = json!({"name": "im3l0", "type": "OphydItem"});
        let mut with_reserved = base.as_object().unwrap().clone();
        for key in RESERVED_KEYS {
            with_reserved.insert((*key).to_string(), json!("x"));
        }

        assert_eq!(
            detect_extras(&record(base), &registry),
            detect_extras(&Record::new(with_reserved), &registry),
        );
    }

    #[test]
    fn unresolvable_schema_is_missing() {
        let registry = SchemaRegistry::new();
        let rec = record(json!({"name": "im3l0", "extra_field": 1}));
        assert_eq!(detect_extras(&rec, &registry), ReportCode::Missing);
    }
}
