//! Sample subset validation.
//!
//! The published sample must be a same-shaped, fixed-size subset of the full
//! dataset.

use crate::{DataSet, ValidationError};
use std::collections::HashSet;

/// Validates a sample file against the full dataset.
pub struct SampleValidator {
    expected_rows: usize,
    id_column: String,
}

impl SampleValidator {
    /// Creates a new sample validator.
    pub fn new(expected_rows: usize, id_column: impl Into<String>) -> Self {
        Self {
            expected_rows,
            id_column: id_column.into(),
        }
    }

    /// Validates row count, column list and id containment.
    pub fn validate(&self, sample: &DataSet, full: &DataSet) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if sample.len() != self.expected_rows {
            errors.push(ValidationError::schema(format!(
                "Sample has {} rows, expected exactly {}",
                sample.len(),
                self.expected_rows
            )));
        }

        let sample_columns: Vec<&str> = sample.column_names().collect();
        let full_columns: Vec<&str> = full.column_names().collect();
        if sample_columns != full_columns {
            errors.push(ValidationError::schema(format!(
                "Sample columns differ from full dataset: expected [{}], found [{}]",
                full_columns.join(", "),
                sample_columns.join(", ")
            )));
        }

        errors.extend(self.validate_ids(sample, full));
        errors
    }

    fn validate_ids(&self, sample: &DataSet, full: &DataSet) -> Option<ValidationError> {
        let id = self.id_column.as_str();
        let (Some(sample_ids), Some(full_ids)) = (sample.column(id), full.column(id)) else {
            return Some(ValidationError::schema(format!(
                "Column '{id}' must be present in both sample and full dataset"
            )));
        };

        let known: HashSet<String> = full_ids.values().iter().map(ToString::to_string).collect();
        let mut unknown: Vec<String> = sample_ids
            .values()
            .iter()
            .map(ToString::to_string)
            .filter(|v| !known.contains(v))
            .collect();

        if unknown.is_empty() {
            return None;
        }

        unknown.sort();
        unknown.dedup();
        let examples: Vec<&str> = unknown.iter().take(5).map(String::as_str).collect();
        Some(ValidationError::schema(format!(
            "{} sample {id} value(s) not present in the full dataset, e.g. [{}]",
            unknown.len(),
            examples.join(", ")
        )))
    }
}
