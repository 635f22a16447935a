//! Report codes emitted by validation stages.
//!
//! A `ReportCode` is the only result shape a stage may produce for a record.
//! The same code carries different diagnostic meaning across stages, so codes
//! are always logged together with their stage label.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a single validation check on a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportCode {
    Success,
    Invalid,
    Missing,
    Extras,
    /// Uninitialized sentinel; never emitted by a completed check.
    NoCode,
}

impl ReportCode {
    /// Numeric wire value, matching the historical database audit codes.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Invalid => 1,
            Self::Missing => 2,
            Self::Extras => 3,
            Self::NoCode => 9,
        }
    }

    /// String representation used in serialized reports and log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Invalid => "invalid",
            Self::Missing => "missing",
            Self::Extras => "extras",
            Self::NoCode => "no_code",
        }
    }

    /// Rank for aggregation. A missing field or schema blocks any further
    /// judgement about the record, so `Missing` outranks `Invalid`.
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::NoCode => 0,
            Self::Success => 1,
            Self::Extras => 2,
            Self::Invalid => 3,
            Self::Missing => 4,
        }
    }

    /// Whether this code represents a finding rather than a pass.
    #[must_use]
    pub const fn is_finding(self) -> bool {
        matches!(self, Self::Invalid | Self::Missing | Self::Extras)
    }

    /// Fold an iterator of codes down to the most severe one.
    ///
    /// An empty iterator yields the `NoCode` sentinel.
    pub fn most_severe<I: IntoIterator<Item = Self>>(codes: I) -> Self {
        codes.into_iter().fold(Self::NoCode, |worst, code| {
            if code.severity() > worst.severity() {
                code
            } else {
                worst
            }
        })
    }
}

impl fmt::Display for ReportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
