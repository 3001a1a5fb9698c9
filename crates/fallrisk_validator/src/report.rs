//! Quality report alignment.

use crate::{ValidationError, approx_eq};
use fallrisk_core::QualityReport;

/// Validates the precomputed quality report.
pub struct ReportValidator {
    expected_score: f64,
    rel: f64,
    abs: f64,
}

impl ReportValidator {
    /// Creates a validator expecting `expected_score` within `rel`/`abs`.
    pub fn new(expected_score: f64, rel: f64, abs: f64) -> Self {
        Self {
            expected_score,
            rel,
            abs,
        }
    }

    /// Validates the report's overall score.
    pub fn validate(&self, report: &QualityReport) -> Option<ValidationError> {
        let actual = report.overall_score;
        if approx_eq(actual, self.expected_score, self.rel, self.abs) {
            return None;
        }

        Some(ValidationError::report(format!(
            "overall_score {actual} differs from expected {} (rel tolerance {})",
            self.expected_score, self.rel
        )))
    }
}

impl Default for ReportValidator {
    fn default() -> Self {
        Self::new(fallrisk_core::DEFAULT_OVERALL_SCORE, 1e-3, 1e-12)
    }
}
