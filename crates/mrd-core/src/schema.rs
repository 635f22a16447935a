//! Container schemas and the schema registry.
//!
//! A container schema is the ordered set of field descriptors ([`EntryInfo`])
//! one container type declares. The [`SchemaRegistry`] maps container names
//! to their schemas and is built once at construction; the audit pipeline
//! queries it and never mutates it.

use std::collections::{BTreeSet, HashMap};

use serde_json::{Value, json};

use crate::enforce::{EnforceRule, ValueType};

/// One field descriptor in a container schema.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub key: &'static str,
    pub optional: bool,
    pub default: Option<Value>,
    pub enforce: EnforceRule,
}

impl EntryInfo {
    /// A required field with no default and no constraint.
    #[must_use]
    pub const fn required(key: &'static str) -> Self {
        Self {
            key,
            optional: false,
            default: None,
            enforce: EnforceRule::Any,
        }
    }

    /// An optional field with no default and no constraint.
    #[must_use]
    pub const fn optional(key: &'static str) -> Self {
        Self {
            key,
            optional: true,
            default: None,
            enforce: EnforceRule::Any,
        }
    }

    #[must_use]
    pub fn enforce(mut self, rule: EnforceRule) -> Self {
        self.enforce = rule;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// The ordered field descriptors for one container type.
#[derive(Debug, Clone)]
pub struct ContainerSchema {
    pub name: &'static str,
    entries: Vec<EntryInfo>,
}

impl ContainerSchema {
    #[must_use]
    pub const fn new(name: &'static str, entries: Vec<EntryInfo>) -> Self {
        Self { name, entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = &EntryInfo> {
        self.entries.iter()
    }

    /// Keys this container declares, for extra-attribute detection.
    #[must_use]
    pub fn declared_keys(&self) -> BTreeSet<&'static str> {
        self.entries.iter().map(|info| info.key).collect()
    }
}

/// Insert a container schema under its own name.
macro_rules! register {
    ($map:expr, $schema:expr) => {{
        let schema = $schema;
        $map.insert(schema.name, schema);
    }};
}

/// Central store of container schemas, keyed by container name.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, ContainerSchema>,
}

impl SchemaRegistry {
    /// Build the registry with all built-in containers.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        register!(schemas, Self::ophyd_item());
        register!(schemas, Self::motor());
        register!(schemas, Self::area_detector());
        register!(schemas, Self::trigger());
        register!(schemas, Self::acromag());

        Self { schemas }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ContainerSchema> {
        self.schemas.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered container names, sorted for stable output.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Descriptors shared by every container.
    fn base_entries() -> Vec<EntryInfo> {
        vec![
            EntryInfo::required("name").enforce(EnforceRule::pattern(r"^[a-z][a-z_0-9]{1,78}$")),
            EntryInfo::required("device_class").enforce(EnforceRule::Type(ValueType::Str)),
            EntryInfo::optional("args")
                .enforce(EnforceRule::Type(ValueType::List))
                .default_value(json!([])),
            EntryInfo::optional("kwargs")
                .enforce(EnforceRule::Type(ValueType::Dict))
                .default_value(json!({"name": "{{name}}"})),
            EntryInfo::optional("active")
                .enforce(EnforceRule::Type(ValueType::Bool))
                .default_value(json!(true)),
            EntryInfo::optional("documentation"),
        ]
    }

    fn ophyd_item() -> ContainerSchema {
        ContainerSchema::new("OphydItem", Self::base_entries())
    }

    fn motor() -> ContainerSchema {
        let mut entries = Self::base_entries();
        entries.push(EntryInfo::required("prefix").enforce(EnforceRule::Type(ValueType::Str)));
        entries.push(EntryInfo::optional("beamline").enforce(EnforceRule::OneOf(vec![
            "HXR".into(),
            "SXR".into(),
            "TST".into(),
        ])));
        ContainerSchema::new("Motor", entries)
    }

    fn area_detector() -> ContainerSchema {
        let mut entries = Self::base_entries();
        entries.push(EntryInfo::required("prefix").enforce(EnforceRule::Type(ValueType::Str)));
        entries.push(EntryInfo::optional("z").enforce(EnforceRule::Range(0.0, 2000.0)));
        ContainerSchema::new("AreaDetector", entries)
    }

    fn trigger() -> ContainerSchema {
        let mut entries = Self::base_entries();
        entries.push(EntryInfo::required("prefix").enforce(EnforceRule::Type(ValueType::Str)));
        entries.push(
            EntryInfo::optional("delay")
                .enforce(EnforceRule::Type(ValueType::Float))
                .default_value(json!(0.0)),
        );
        ContainerSchema::new("Trigger", entries)
    }

    fn acromag() -> ContainerSchema {
        let mut entries = Self::base_entries();
        entries.push(EntryInfo::required("prefix").enforce(EnforceRule::Type(ValueType::Str)));
        entries.push(EntryInfo::required("channel").enforce(EnforceRule::Range(0.0, 15.0)));
        ContainerSchema::new("Acromag", entries)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn registry_contains_builtins() {
        let registry = SchemaRegistry::new();
        assert!(registry.contains("OphydItem"));
        assert!(registry.contains("Motor"));
        assert!(!registry.contains("NotAContainer"));
    }

    #[test]
    fn names_are_sorted() {
        let registry = SchemaRegistry::new();
        assert_eq!(
            registry.names(),
            vec!["Acromag", "AreaDetector", "Motor", "OphydItem", "Trigger"]
        );
    }

    #[test]
    fn declared_keys_cover_base_fields() {
        let registry = SchemaRegistry::new();
        let keys = registry.get("OphydItem").unwrap().declared_keys();
        for key in ["name", "device_class", "args", "kwargs", "active"] {
            assert!(keys.contains(key), "missing declared key {key}");
        }
    }

    #[test]
    fn motor_extends_base_schema() {
        let registry = SchemaRegistry::new();
        let motor = registry.get("Motor").unwrap();
        assert!(motor.declared_keys().contains("prefix"));
        assert!(motor.declared_keys().contains("beamline"));
    }
}
