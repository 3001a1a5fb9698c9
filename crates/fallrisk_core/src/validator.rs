//! Check identifiers and validation report types.
//!
//! Each check is an independent property of the dataset. A run produces one
//! [`CheckResult`] per check, collected into a [`ValidationReport`].

use crate::DatasetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one dataset check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Required files exist and are non-empty
    Existence,
    /// CSV columns and row count match the schema
    SchemaAlignment,
    /// Per-field type, category and range constraints
    FieldConstraints,
    /// Documented percentiles match the data
    Percentiles,
    /// Sample file is a same-shaped subset of the full dataset
    SampleSubset,
    /// Label classes are not extremely imbalanced
    LabelBalance,
    /// Quality report matches the expected score
    QualityReport,
    /// Participant identifiers are unique
    UniqueIds,
}

impl CheckKind {
    /// Every check, in run order.
    pub const ALL: [CheckKind; 8] = [
        CheckKind::Existence,
        CheckKind::SchemaAlignment,
        CheckKind::FieldConstraints,
        CheckKind::Percentiles,
        CheckKind::SampleSubset,
        CheckKind::LabelBalance,
        CheckKind::QualityReport,
        CheckKind::UniqueIds,
    ];

    /// Returns the snake_case name of the check.
    pub fn as_str(self) -> &'static str {
        match self {
            CheckKind::Existence => "existence",
            CheckKind::SchemaAlignment => "schema_alignment",
            CheckKind::FieldConstraints => "field_constraints",
            CheckKind::Percentiles => "percentiles",
            CheckKind::SampleSubset => "sample_subset",
            CheckKind::LabelBalance => "label_balance",
            CheckKind::QualityReport => "quality_report",
            CheckKind::UniqueIds => "unique_ids",
        }
    }

    /// Returns the names of all checks.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.as_str()).collect()
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| DatasetError::UnknownCheck(s.to_string()))
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// Which check ran
    pub kind: CheckKind,

    /// Failure messages; empty when the check passed
    pub errors: Vec<String>,
}

impl CheckResult {
    /// Creates a passing result.
    pub fn pass(kind: CheckKind) -> Self {
        Self {
            kind,
            errors: Vec::new(),
        }
    }

    /// Creates a result from any displayable failures.
    pub fn from_errors<E: fmt::Display>(
        kind: CheckKind,
        errors: impl IntoIterator<Item = E>,
    ) -> Self {
        Self {
            kind,
            errors: errors.into_iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Whether the check passed.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Report of a validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Whether every check passed
    pub passed: bool,

    /// One result per check that ran
    pub checks: Vec<CheckResult>,

    /// Run statistics
    pub stats: ValidationStats,
}

/// Statistics about a validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationStats {
    /// Number of rows in the full dataset
    pub records_validated: usize,

    /// Number of schema fields
    pub fields_checked: usize,

    /// Number of checks executed
    pub checks_run: usize,

    /// Run duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Builds a report from check results.
    pub fn from_checks(checks: Vec<CheckResult>, stats: ValidationStats) -> Self {
        Self {
            passed: checks.iter().all(CheckResult::passed),
            checks,
            stats,
        }
    }

    /// Returns the result of a given check, if it ran.
    pub fn check(&self, kind: CheckKind) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.kind == kind)
    }

    /// Returns the checks that failed.
    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed())
    }

    /// Returns every failure message, prefixed with its check name.
    pub fn errors(&self) -> Vec<String> {
        self.failed_checks()
            .flat_map(|c| c.errors.iter().map(move |e| format!("[{}] {}", c.kind, e)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_check_kind_parse() {
        assert_eq!("percentiles".parse::<CheckKind>().unwrap(), CheckKind::Percentiles);
        assert_eq!(
            "Schema-Alignment".parse::<CheckKind>().unwrap(),
            CheckKind::SchemaAlignment
        );
        assert!(matches!(
            "freshness".parse::<CheckKind>(),
            Err(DatasetError::UnknownCheck(_))
        ));
    }

    #[test]
    fn test_check_kind_display_roundtrip() {
        for kind in CheckKind::ALL {
            assert_eq!(kind.to_string().parse::<CheckKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_report_passed_only_when_all_checks_pass() {
        let report = ValidationReport::from_checks(
            vec![
                CheckResult::pass(CheckKind::Existence),
                CheckResult::from_errors(CheckKind::LabelBalance, ["too imbalanced"]),
            ],
            ValidationStats::default(),
        );

        assert!(!report.passed);
        assert_eq!(report.failed_checks().count(), 1);
        assert_eq!(report.errors(), vec!["[label_balance] too imbalanced"]);
        assert!(report.check(CheckKind::Existence).unwrap().passed());
        assert!(report.check(CheckKind::Percentiles).is_none());
    }

    #[test]
    fn test_empty_report_passes() {
        let report = ValidationReport::from_checks(Vec::new(), ValidationStats::default());
        assert!(report.passed);
        assert!(report.errors().is_empty());
    }
}
