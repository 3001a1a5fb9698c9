//! Distribution and key checks.
//!
//! This module handles the statistical checks run over the full dataset:
//! - Percentiles: computed quantiles match the documented thresholds
//! - Label balance: no class of the label is vanishingly rare or dominant
//! - Uniqueness: the key column holds no repeated values

use crate::{DataSet, ValidationError, approx_eq, quantiles};
use fallrisk_core::{DatasetSchema, LabelBounds, PercentileThresholds};
use std::collections::HashSet;

/// Validates distributional properties of a dataset.
pub struct DistributionValidator {
    percentile_rel: f64,
    percentile_abs: f64,
    label_bounds: LabelBounds,
}

impl DistributionValidator {
    /// Creates a new distribution validator.
    pub fn new(percentile_rel: f64, percentile_abs: f64, label_bounds: LabelBounds) -> Self {
        Self {
            percentile_rel,
            percentile_abs,
            label_bounds,
        }
    }

    /// Validates the documented percentiles of each listed column.
    pub fn validate_percentiles<S: AsRef<str>>(
        &self,
        schema: &DatasetSchema,
        dataset: &DataSet,
        columns: &[S],
    ) -> Vec<ValidationError> {
        columns
            .iter()
            .flat_map(|c| self.validate_column_percentiles(schema, dataset, c.as_ref()))
            .collect()
    }

    /// Validates the documented percentiles of one column.
    pub fn validate_column_percentiles(
        &self,
        schema: &DatasetSchema,
        dataset: &DataSet,
        column: &str,
    ) -> Vec<ValidationError> {
        let Some(expected) = schema.thresholds_for(column) else {
            return vec![ValidationError::distribution(
                column,
                "schema documents no percentile thresholds",
            )];
        };

        let Some(data) = dataset.column(column) else {
            return vec![ValidationError::distribution(column, "column is absent from the dataset")];
        };

        if !data.kind().is_numeric() {
            return vec![ValidationError::distribution(
                column,
                format!("cannot compute percentiles of a {} column", data.kind().dtype()),
            )];
        }

        let Some(actual) = quantiles(&data.numbers(), &PercentileThresholds::LEVELS) else {
            return vec![ValidationError::distribution(column, "column has no values")];
        };

        expected
            .entries()
            .iter()
            .zip(actual)
            .filter(|((_, _, want), got)| {
                !approx_eq(*got, *want, self.percentile_rel, self.percentile_abs)
            })
            .map(|((label, _, want), got)| {
                ValidationError::distribution(
                    column,
                    format!("{column} {label} mismatch: observed {got}, expected {want}"),
                )
            })
            .collect()
    }

    /// Validates that each class proportion of the label lies strictly
    /// inside the configured bounds.
    pub fn validate_label_balance(
        &self,
        dataset: &DataSet,
        label_column: &str,
    ) -> Vec<ValidationError> {
        let Some(column) = dataset.column(label_column) else {
            return vec![ValidationError::distribution(
                label_column,
                "label column is absent from the dataset",
            )];
        };

        if column.is_empty() {
            return vec![ValidationError::distribution(label_column, "label column has no values")];
        }

        let total = column.len() as f64;
        let LabelBounds { min, max } = self.label_bounds;

        column
            .value_counts()
            .into_iter()
            .map(|(class, count)| (class, count as f64 / total))
            .filter(|(_, share)| *share <= min || *share >= max)
            .map(|(class, share)| {
                ValidationError::distribution(
                    label_column,
                    format!(
                        "class {class} has proportion {share:.4}, outside ({min}, {max})"
                    ),
                )
            })
            .collect()
    }

    /// Validates that a key column holds no repeated values.
    pub fn validate_unique(&self, dataset: &DataSet, id_column: &str) -> Option<ValidationError> {
        let Some(column) = dataset.column(id_column) else {
            return Some(ValidationError::duplicate_key(
                id_column,
                "key column is absent from the dataset",
            ));
        };

        let mut seen = HashSet::with_capacity(column.len());
        let mut duplicates = Vec::new();
        for value in column.values() {
            let key = value.to_string();
            if !seen.insert(key.clone()) {
                duplicates.push(key);
            }
        }

        if duplicates.is_empty() {
            return None;
        }

        let examples: Vec<&str> = duplicates.iter().take(5).map(String::as_str).collect();
        Some(ValidationError::duplicate_key(
            id_column,
            format!(
                "found {} duplicate(s), e.g. [{}]",
                duplicates.len(),
                examples.join(", ")
            ),
        ))
    }
}

impl Default for DistributionValidator {
    fn default() -> Self {
        Self::new(1e-4, 1e-4, LabelBounds::default())
    }
}
