//! Per-field enforcement check.
//!
//! Evaluates every descriptor of the record's schema and returns the most
//! severe code, logging each violation individually. Stopping at the first
//! failing or passing field would under-report multi-field violations.

use mrd_core::{Record, ReportCode, SchemaRegistry};

/// Re-validate each schema field's stored value against its enforcement
/// rule. `Missing` if the record's schema cannot be resolved; otherwise
/// `Invalid` if any field violates its rule, `Success` when all pass.
#[must_use]
pub fn validate_enforce(record: &Record, registry: &SchemaRegistry) -> ReportCode {
    let device = record.label();
    let Some(schema) = record.container().and_then(|name| registry.get(name)) else {
        tracing::warn!(device, "record is missing a resolvable container");
        return ReportCode::Missing;
    };

    let mut codes = Vec::new();
    for info in schema.entries() {
        let code = match record.get(info.key) {
            Some(value) => match info.enforce.check(value) {
                Ok(()) => ReportCode::Success,
                Err(error) => {
                    tracing::info!(device, key = info.key, %error, "invalid value");
                    ReportCode::Invalid
                }
            },
            None if info.optional || info.default.is_some() => ReportCode::Success,
            None => {
                tracing::info!(device, key = info.key, "required field absent");
                ReportCode::Invalid
            }
        };
        codes.push(code);
    }

    ReportCode::most_severe(codes)
}
