//! The staged audit report.
//!
//! Stages emit [`StageResult`]s; the orchestrator groups them into
//! [`StageSection`]s under the section banners the report is logged with.
//! The whole report serializes for machine consumption.

use std::fmt;

use mrd_core::ReportCode;
use serde::Serialize;

/// Which stage produced a result. A report code is only meaningful in the
/// context of its stage, so results always carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Entries,
    ArgsKwargs,
    EnforceValues,
    ModuleExists,
    DeviceClass,
    Container,
    ExtraAttributes,
}

impl Stage {
    /// Section banner used in the human-readable report.
    #[must_use]
    pub const fn banner(self) -> &'static str {
        match self {
            Self::Entries => "VALIDATING ENTRIES",
            Self::ArgsKwargs => "VALIDATING ARGS & KWARGS",
            Self::EnforceValues => "VALIDATING ENFORCE VALUES",
            Self::ModuleExists => "VALIDATING DEVICE MODULE EXISTS",
            Self::DeviceClass => "VALIDATING DEVICE CLASS",
            Self::Container => "VALIDATING CONTAINER",
            Self::ExtraAttributes => "EXTRA ATTRIBUTES",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.banner())
    }
}

/// Outcome of one stage for one record (or one module, in the
/// module-existence stage). The device-class import pass may signal two
/// codes together when "class misspelled" and "module absent" cannot be
/// told apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageResult {
    pub record: String,
    pub codes: Vec<ReportCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl StageResult {
    #[must_use]
    pub fn new(record: &str, code: ReportCode) -> Self {
        Self {
            record: record.to_string(),
            codes: vec![code],
            detail: None,
        }
    }

    #[must_use]
    pub fn with_codes(record: &str, codes: Vec<ReportCode>) -> Self {
        Self {
            record: record.to_string(),
            codes,
            detail: None,
        }
    }

    #[must_use]
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// The single most severe code this result carries.
    #[must_use]
    pub fn worst(&self) -> ReportCode {
        ReportCode::most_severe(self.codes.iter().copied())
    }
}

/// All results one stage produced.
#[derive(Debug, Clone, Serialize)]
pub struct StageSection {
    pub stage: Stage,
    pub results: Vec<StageResult>,
}

impl StageSection {
    #[must_use]
    pub const fn new(stage: Stage) -> Self {
        Self {
            stage,
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: StageResult) {
        self.results.push(result);
    }

    /// Count of results carrying at least one finding code.
    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.results
            .iter()
            .filter(|result| result.codes.iter().any(|code| code.is_finding()))
            .count()
    }
}

/// The complete staged report for one audit run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    pub sections: Vec<StageSection>,
}

impl AuditReport {
    pub fn push(&mut self, section: StageSection) {
        self.sections.push(section);
    }

    #[must_use]
    pub fn section(&self, stage: Stage) -> Option<&StageSection> {
        self.sections.iter().find(|section| section.stage == stage)
    }

    /// Codes a stage produced for a named record, if any.
    #[must_use]
    pub fn codes_for(&self, stage: Stage, record: &str) -> Option<&[ReportCode]> {
        self.section(stage)?
            .results
            .iter()
            .find(|result| result.record == record)
            .map(|result| result.codes.as_slice())
    }

    /// Total findings across all sections.
    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.sections.iter().map(StageSection::finding_count).sum()
    }
}
