//! Container declaration check.

use mrd_core::{Record, ReportCode, SchemaRegistry};

/// Check that a record declares a known container type.
///
/// Pure function of (record, registry): `Invalid` if `type` is set but
/// names no registered schema, `Missing` if `type` is absent, `Success`
/// otherwise.
#[must_use]
pub fn validate_container(record: &Record, registry: &SchemaRegistry) -> ReportCode {
    let device = record.label();
    match record.container() {
        Some(container) if !registry.contains(container) => {
            tracing::error!(device, container, "invalid device container");
            ReportCode::Invalid
        }
        Some(_) => ReportCode::Success,
        None => {
            tracing::error!(device, "no container provided");
            ReportCode::Missing
        }
    }
}
