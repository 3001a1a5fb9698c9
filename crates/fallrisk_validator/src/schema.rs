//! Schema alignment logic.
//!
//! Compares a loaded dataset's columns and row count with the schema, and
//! sanity-checks the schema definition itself.

use crate::{DataSet, ValidationError};
use fallrisk_core::{ColumnOrder, DatasetSchema, FieldType};
use std::collections::BTreeSet;

/// Validates that a dataset has exactly the columns and rows the schema
/// declares.
pub struct SchemaValidator {
    column_order: ColumnOrder,
}

impl SchemaValidator {
    /// Creates a new schema validator using the given column comparison.
    pub fn new(column_order: ColumnOrder) -> Self {
        Self { column_order }
    }

    /// Validates columns and row count.
    ///
    /// Returns a list of validation errors. An empty list indicates success.
    pub fn validate(&self, schema: &DatasetSchema, dataset: &DataSet) -> Vec<ValidationError> {
        let mut errors = self.validate_columns(schema, dataset);
        errors.extend(self.validate_row_count(schema, dataset));
        errors
    }

    /// Validates the dataset's column names against the schema fields.
    ///
    /// Headers repeated in the CSV are reported first, in both modes.
    pub fn validate_columns(
        &self,
        schema: &DatasetSchema,
        dataset: &DataSet,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let duplicated = dataset.duplicate_column_names();
        if !duplicated.is_empty() {
            errors.push(ValidationError::schema(format!(
                "Duplicate columns in CSV: [{}]",
                duplicated.join(", ")
            )));
        }

        let expected: BTreeSet<&str> = schema.field_names().collect();
        let actual: BTreeSet<&str> = dataset.column_names().collect();

        let missing: Vec<&str> = expected.difference(&actual).copied().collect();
        let extra: Vec<&str> = actual.difference(&expected).copied().collect();

        if !missing.is_empty() {
            errors.push(ValidationError::schema(format!(
                "Columns missing in CSV: [{}]",
                missing.join(", ")
            )));
        }

        if !extra.is_empty() {
            errors.push(ValidationError::schema(format!(
                "Unexpected columns in CSV: [{}]",
                extra.join(", ")
            )));
        }

        if self.column_order == ColumnOrder::Ordered && errors.is_empty() {
            let expected: Vec<&str> = schema.field_names().collect();
            let actual: Vec<&str> = dataset.column_names().collect();
            if expected != actual {
                errors.push(ValidationError::schema(format!(
                    "Column order differs from schema: expected [{}], found [{}]",
                    expected.join(", "),
                    actual.join(", ")
                )));
            }
        }

        errors
    }

    /// Validates that the dataset has the declared number of rows.
    pub fn validate_row_count(
        &self,
        schema: &DatasetSchema,
        dataset: &DataSet,
    ) -> Option<ValidationError> {
        if dataset.len() == schema.rows {
            return None;
        }

        Some(ValidationError::schema(format!(
            "Row count mismatch: schema declares {} rows, CSV has {}",
            schema.rows,
            dataset.len()
        )))
    }

    /// Checks that the schema itself is well-formed.
    pub fn validate_schema_definition(&self, schema: &DatasetSchema) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if schema.fields.is_empty() {
            errors.push(ValidationError::schema("Schema has no fields defined"));
        }

        for field in &schema.fields {
            if field.field_type == FieldType::Categorical
                && field.values.as_ref().is_none_or(Vec::is_empty)
            {
                errors.push(ValidationError::schema(format!(
                    "Categorical field '{}' declares no values",
                    field.name
                )));
            }

            if let Some(range) = field.range {
                if range.min > range.max {
                    errors.push(ValidationError::schema(format!(
                        "Field '{}' has an empty range [{}, {}]",
                        field.name, range.min, range.max
                    )));
                }
            }
        }

        for column in schema.percentile_thresholds.keys() {
            match schema.field(column) {
                None => errors.push(ValidationError::schema(format!(
                    "Percentile thresholds reference undeclared field '{column}'"
                ))),
                Some(field) if !field.field_type.is_numeric() => {
                    errors.push(ValidationError::schema(format!(
                        "Percentile thresholds declared for non-numeric field '{column}'"
                    )))
                }
                Some(_) => {}
            }
        }

        for (column, thresholds) in &schema.percentile_thresholds {
            let values: Vec<f64> = thresholds.entries().iter().map(|(_, _, v)| *v).collect();
            if values.windows(2).any(|w| w[0] > w[1]) {
                errors.push(ValidationError::schema(format!(
                    "Percentile thresholds for '{column}' are not non-decreasing"
                )));
            }
        }

        errors
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new(ColumnOrder::default())
    }
}
