//! The pipeline orchestrator.
//!
//! Runs all checks across the full record collection in a fixed stage
//! order, each stage completed over every record before the next begins.
//! Stage transitions are unconditional: no per-record finding halts the
//! run. The orchestrator owns the pipeline state and emits both the
//! banner-demarcated log report and the serializable [`AuditReport`].

use std::time::Duration;

use mrd_core::{Record, ReportCode, SchemaRegistry};

use crate::checks;
use crate::oracle::{ExistenceOracle, PackageIndex};
use crate::probe::ImportProbe;
use crate::report::{AuditReport, Stage, StageResult, StageSection};
use crate::state::PipelineState;

/// One configured audit run over a record collection.
pub struct AuditPipeline<'a, I, P> {
    registry: &'a SchemaRegistry,
    index: &'a I,
    probe: &'a P,
    lookup_timeout: Duration,
}

impl<'a, I: PackageIndex, P: ImportProbe> AuditPipeline<'a, I, P> {
    #[must_use]
    pub const fn new(
        registry: &'a SchemaRegistry,
        index: &'a I,
        probe: &'a P,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            index,
            probe,
            lookup_timeout,
        }
    }

    /// Run the full validation sequence.
    pub async fn run(&self, records: &[Record]) -> AuditReport {
        let mut report = AuditReport::default();
        let mut state = PipelineState::new();

        if records.is_empty() {
            tracing::error!("cannot run the validation sequence: no records were loaded");
        }

        report.push(self.validate_entries(records, Stage::Entries));
        report.push(self.validate_arguments(records).await);
        report.push(self.validate_enforce_values(records));

        // Module discovery runs over the whole collection before any
        // import attempt; the import pass depends on it.
        for record in records {
            checks::discover_module(record, &mut state);
        }

        report.push(self.confirm_modules(&mut state).await);
        report.push(self.validate_device_classes(records, &state).await);
        report.push(self.validate_entries(records, Stage::Container));

        report
    }

    /// Run only the extra-attribute check (`--extras` mode).
    #[must_use]
    pub fn run_extras(&self, records: &[Record]) -> AuditReport {
        let mut report = AuditReport::default();
        let mut section = StageSection::new(Stage::ExtraAttributes);
        banner(Stage::ExtraAttributes);

        for record in records {
            let code = checks::detect_extras(record, self.registry);
            section.push(StageResult::new(record.label(), code));
        }

        report.push(section);
        report
    }

    /// Container check; runs once at the start and again at the end, under
    /// different section banners.
    fn validate_entries(&self, records: &[Record], stage: Stage) -> StageSection {
        let mut section = StageSection::new(stage);
        banner(stage);

        for record in records {
            let code = checks::validate_container(record, self.registry);
            section.push(StageResult::new(record.label(), code));
        }

        section
    }

    async fn validate_arguments(&self, records: &[Record]) -> StageSection {
        let mut section = StageSection::new(Stage::ArgsKwargs);
        banner(Stage::ArgsKwargs);

        for record in records {
            let resolved = checks::resolve_arguments(record);

            if !resolved.is_clean() {
                section.push(
                    StageResult::new(record.label(), ReportCode::Invalid)
                        .detail(resolved.failures.join("; ")),
                );
                continue;
            }

            // Construction is attempted with the resolved arguments; an
            // exception there is a finding, never fatal to the run.
            let code = match record.device_class() {
                Some(class_path) => {
                    match self
                        .probe
                        .construct(class_path, &resolved.args, &resolved.kwargs)
                        .await
                    {
                        Ok(()) => ReportCode::Success,
                        Err(error) => {
                            tracing::warn!(
                                device = record.label(),
                                class_path,
                                %error,
                                "constructing with resolved args and kwargs errored"
                            );
                            section.push(
                                StageResult::new(record.label(), ReportCode::Invalid)
                                    .detail(error.to_string()),
                            );
                            continue;
                        }
                    }
                }
                None => ReportCode::Success,
            };
            section.push(StageResult::new(record.label(), code));
        }

        section
    }

    fn validate_enforce_values(&self, records: &[Record]) -> StageSection {
        let mut section = StageSection::new(Stage::EnforceValues);
        banner(Stage::EnforceValues);

        for record in records {
            let code = checks::validate_enforce(record, self.registry);
            section.push(StageResult::new(record.label(), code));
        }

        section
    }

    /// The existence oracle pass; results here are per module, not per
    /// record.
    async fn confirm_modules(&self, state: &mut PipelineState) -> StageSection {
        let mut section = StageSection::new(Stage::ModuleExists);
        banner(Stage::ModuleExists);

        let oracle = ExistenceOracle::new(self.index, self.probe, self.lookup_timeout);
        let confirmed = oracle.confirm(state.modules()).await;

        for module in state.modules() {
            let code = if confirmed.contains(module) {
                ReportCode::Success
            } else {
                ReportCode::Invalid
            };
            section.push(StageResult::new(module, code).detail("top-level module"));
        }

        state.set_confirmed(confirmed);
        section
    }

    async fn validate_device_classes(
        &self,
        records: &[Record],
        state: &PipelineState,
    ) -> StageSection {
        let mut section = StageSection::new(Stage::DeviceClass);
        banner(Stage::DeviceClass);

        for record in records {
            let codes = checks::validate_import(record, state, self.probe).await;
            section.push(StageResult::with_codes(record.label(), codes));
        }

        section
    }
}

/// Demarcate a report section in the log stream.
fn banner(stage: Stage) {
    tracing::info!("");
    tracing::info!("--------- {} ---------", stage.banner());
    tracing::info!("");
}
