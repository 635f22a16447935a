//! # mrd-audit
//!
//! The validation pipeline: a fixed sequence of independent checks run over
//! the full record collection, accumulating cross-cutting state (discovered
//! top-level modules, records with resolvable classes) and emitting a staged
//! report.
//!
//! Stage order is fixed and each stage completes over every record before
//! the next begins, because the device-class import pass depends on module
//! discovery and package-existence confirmation across the *entire*
//! collection. No stage failure halts the pipeline; every anomaly becomes a
//! logged finding.

pub mod checks;
pub mod fixtures;
pub mod oracle;
pub mod pipeline;
pub mod probe;
pub mod report;
pub mod state;

pub use oracle::{ExistenceOracle, IndexError, PackageIndex};
pub use pipeline::AuditPipeline;
pub use probe::{ImportProbe, ProbeError, PythonProbe};
pub use report::{AuditReport, Stage, StageResult, StageSection};
pub use state::PipelineState;
