//! Pipeline-wide accumulated state.
//!
//! Owned exclusively by the orchestrator and passed explicitly into stages,
//! so stages stay testable in isolation and nothing leaks across runs.
//! Populated by the class-field discovery pass, consulted (not mutated) by
//! the existence oracle and the import pass.

use std::collections::BTreeSet;

/// Cross-stage state for one audit run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineState {
    modules: BTreeSet<String>,
    class_records: Vec<String>,
    confirmed: BTreeSet<String>,
}

impl PipelineState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a discovered top-level module and the record that referenced
    /// it. Idempotent: re-discovering the same pair changes nothing.
    pub fn record_module(&mut self, module: &str, record_label: &str) {
        self.modules.insert(module.to_string());
        if !self.class_records.iter().any(|label| label == record_label) {
            self.class_records.push(record_label.to_string());
        }
    }

    /// Top-level module names observed across all records.
    #[must_use]
    pub const fn modules(&self) -> &BTreeSet<String> {
        &self.modules
    }

    /// Labels of records whose `device_class` referenced a discovered module.
    #[must_use]
    pub fn class_records(&self) -> &[String] {
        &self.class_records
    }

    /// Replace the confirmed-module subset after the oracle pass.
    pub fn set_confirmed(&mut self, confirmed: BTreeSet<String>) {
        self.confirmed = confirmed;
    }

    #[must_use]
    pub const fn confirmed(&self) -> &BTreeSet<String> {
        &self.confirmed
    }

    #[must_use]
    pub fn is_confirmed(&self, module: &str) -> bool {
        self.confirmed.contains(module)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn discovery_is_idempotent() {
        let mut once = PipelineState::new();
        once.record_module("ophyd", "im3l0");
        once.record_module("pcdsdevices", "at1k4");

        let mut twice = once.clone();
        twice.record_module("ophyd", "im3l0");
        twice.record_module("pcdsdevices", "at1k4");

        assert_eq!(once, twice);
    }

    #[test]
    fn confirmation_is_a_subset_check() {
        let mut state = PipelineState::new();
        state.record_module("ophyd", "im3l0");
        state.record_module("missingmod", "bad1");

        state.set_confirmed(["ophyd".to_string()].into_iter().collect());
        assert!(state.is_confirmed("ophyd"));
        assert!(!state.is_confirmed("missingmod"));
        // Discovery set is untouched by confirmation.
        assert_eq!(state.modules().len(), 2);
    }
}
