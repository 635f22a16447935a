//! Device-class field checks.
//!
//! Three distinct operations, deliberately separated: format validation
//! (a report code), module discovery (pure state accumulation), and the
//! import pass (report codes, only for confirmed modules). The discovery
//! pass runs once over all records before any import attempt.

use mrd_core::{Record, ReportCode};

use crate::probe::{ImportProbe, ProbeError};
use crate::state::PipelineState;

/// Syntactic check of the `device_class` field: `Missing` if absent,
/// `Invalid` if it has no module/class separator.
#[must_use]
pub fn validate_class_format(record: &Record) -> ReportCode {
    let device = record.label();
    let Some(class_path) = record.device_class() else {
        tracing::warn!(device, "device_class cannot be empty");
        return ReportCode::Missing;
    };
    if !class_path.contains('.') {
        tracing::warn!(device, class_path, "device_class has no module separator");
        return ReportCode::Invalid;
    }
    ReportCode::Success
}

/// Record the top-level module of a record's class path into the pipeline
/// state. Records with an absent or separator-less `device_class` contribute
/// nothing; they are reported by [`validate_class_format`] instead.
pub fn discover_module(record: &Record, state: &mut PipelineState) {
    if let Some(class_path) = record.device_class() {
        if let Some((module, _)) = class_path.split_once('.') {
            state.record_module(module, record.label());
        }
    }
}

/// The import pass for one record.
///
/// Only runs the dynamic import for modules the oracle confirmed. An import
/// failure for a confirmed module signals `Invalid` and `Missing` together:
/// whether the class is misspelled or the module is absent from the
/// environment is inherently ambiguous and both readings are surfaced.
pub async fn validate_import<P: ImportProbe>(
    record: &Record,
    state: &PipelineState,
    probe: &P,
) -> Vec<ReportCode> {
    let device = record.label();
    let Some(class_path) = record.device_class() else {
        return vec![ReportCode::Missing];
    };
    let Some((module, _)) = class_path.split_once('.') else {
        tracing::warn!(device, class_path, "device_class has no module separator");
        return vec![ReportCode::Invalid];
    };

    if !state.is_confirmed(module) {
        tracing::warn!(
            device,
            class_path,
            module,
            "unknown module, skipping import"
        );
        return vec![ReportCode::Invalid];
    }

    match probe.import_path(class_path).await {
        Ok(()) => vec![ReportCode::Success],
        Err(ProbeError::NotFound(reason)) => {
            tracing::warn!(
                device,
                class_path,
                %reason,
                "either the class is misspelled or it is not part of the environment"
            );
            vec![ReportCode::Invalid, ReportCode::Missing]
        }
        Err(error) => {
            tracing::warn!(device, class_path, %error, "import probe failed");
            vec![ReportCode::Invalid, ReportCode::Missing]
        }
    }
}
