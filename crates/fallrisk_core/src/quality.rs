//! Precomputed quality report shipped alongside the dataset.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Summary statistics artifact accompanying the dataset.
///
/// Only `overall_score` is interpreted; every other key is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Aggregate quality score in `[0, 1]`
    pub overall_score: f64,

    /// Remaining report sections
    #[serde(flatten)]
    pub sections: Map<String, Value>,
}

impl QualityReport {
    /// Creates a report carrying only an overall score.
    pub fn with_score(overall_score: f64) -> Self {
        Self {
            overall_score,
            sections: Map::new(),
        }
    }

    /// Returns a named report section.
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }
}
