//! Field constraint validation logic.
//!
//! This module checks every schema field against its column:
//! - float / integer / binary: the column must be numeric
//! - integer: every value is a whole number
//! - binary: values are a subset of {0, 1}
//! - categorical: values are a subset of the declared set
//! - string: the column is textual
//! - range: observed min/max lie within the declared bounds (plus epsilon)

use crate::{Column, DataSet, DataValue, ValidationError, min_max};
use fallrisk_core::{CategoryValue, DatasetSchema, Field, FieldType, ValueRange};

/// Maximum number of offending values quoted in one message.
const MAX_EXAMPLES: usize = 5;

/// Validates per-field constraints in a dataset.
pub struct ConstraintValidator {
    range_epsilon: f64,
}

impl ConstraintValidator {
    /// Creates a new constraint validator with the given range slack.
    pub fn new(range_epsilon: f64) -> Self {
        Self { range_epsilon }
    }

    /// Validates all field constraints of a schema against a dataset.
    ///
    /// Returns a list of validation errors. An empty list indicates success.
    pub fn validate(&self, schema: &DatasetSchema, dataset: &DataSet) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for field in &schema.fields {
            let mut columns = dataset.columns_named(&field.name).peekable();
            if columns.peek().is_none() {
                errors.push(ValidationError::schema(format!(
                    "Field '{}' is declared in the schema but absent from the dataset",
                    field.name
                )));
            }
            // every copy of a repeated header is checked
            for column in columns {
                errors.extend(self.validate_field(field, column));
            }
        }

        errors
    }

    /// Validates one field against its column.
    pub fn validate_field(&self, field: &Field, column: &Column) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let name = &field.name;

        if field.field_type.is_numeric() && !column.kind().is_numeric() {
            errors.push(ValidationError::type_constraint(
                name,
                format!("{name} should be numeric (found {})", column.kind().dtype()),
            ));
        }

        match field.field_type {
            FieldType::Integer if column.kind().is_numeric() => {
                errors.extend(self.check_integral(name, column));
            }
            FieldType::Binary if column.kind().is_numeric() => {
                errors.extend(self.check_binary(name, column));
            }
            FieldType::Categorical => {
                errors.extend(self.check_categories(field, column));
            }
            FieldType::String if column.kind().is_numeric() => {
                errors.push(ValidationError::type_constraint(
                    name,
                    format!("{name} should be a string (found {})", column.kind().dtype()),
                ));
            }
            _ => {}
        }

        if let Some(range) = field.range {
            errors.extend(self.check_range(name, column, range));
        }

        errors
    }

    fn check_integral(&self, name: &str, column: &Column) -> Option<ValidationError> {
        let fractional: Vec<f64> = column
            .numbers()
            .into_iter()
            .filter(|v| v % 1.0 != 0.0)
            .collect();

        if fractional.is_empty() {
            return None;
        }

        Some(ValidationError::type_constraint(
            name,
            format!(
                "{name} contains non-integer values ({} found, e.g. {})",
                fractional.len(),
                quote(fractional.iter())
            ),
        ))
    }

    fn check_binary(&self, name: &str, column: &Column) -> Option<ValidationError> {
        let invalid: Vec<&DataValue> = column
            .distinct()
            .into_iter()
            .filter(|v| !matches!(v.as_float(), Some(x) if x == 0.0 || x == 1.0))
            .collect();

        if invalid.is_empty() {
            return None;
        }

        Some(ValidationError::type_constraint(
            name,
            format!("{name} is not binary (unexpected values: {})", quote(invalid.iter())),
        ))
    }

    fn check_categories(&self, field: &Field, column: &Column) -> Option<ValidationError> {
        let name = &field.name;
        let allowed = match &field.values {
            Some(values) => values,
            None => {
                return Some(ValidationError::type_constraint(
                    name,
                    format!("{name} is categorical but the schema declares no values"),
                ));
            }
        };

        let unexpected: Vec<&DataValue> = column
            .distinct()
            .into_iter()
            .filter(|v| !allowed.iter().any(|a| category_matches(v, a)))
            .collect();

        if unexpected.is_empty() {
            return None;
        }

        Some(ValidationError::type_constraint(
            name,
            format!(
                "{name} has unexpected categories: {} (allowed: {})",
                quote(unexpected.iter()),
                allowed
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        ))
    }

    fn check_range(&self, name: &str, column: &Column, range: ValueRange) -> Vec<ValidationError> {
        if !column.kind().is_numeric() {
            return vec![ValidationError::type_constraint(
                name,
                format!("{name} declares a range but holds non-numeric values"),
            )];
        }

        let Some((actual_min, actual_max)) = min_max(&column.numbers()) else {
            return vec![ValidationError::type_constraint(
                name,
                format!("{name} has no values to compare against its range"),
            )];
        };

        let mut errors = Vec::new();

        if range.min > actual_min + self.range_epsilon {
            errors.push(ValidationError::type_constraint(
                name,
                format!("{name} min {actual_min} < {}", range.min),
            ));
        }

        if actual_max > range.max + self.range_epsilon {
            errors.push(ValidationError::type_constraint(
                name,
                format!("{name} max {actual_max} > {}", range.max),
            ));
        }

        errors
    }
}

impl Default for ConstraintValidator {
    fn default() -> Self {
        Self::new(1e-9)
    }
}

/// Numeric cells match numeric categories by value; text matches text.
fn category_matches(value: &DataValue, category: &CategoryValue) -> bool {
    match value {
        DataValue::String(s) => category.as_text() == Some(s.as_str()),
        _ => value.as_float().is_some() && value.as_float() == category.as_f64(),
    }
}

fn quote<T: std::fmt::Display>(values: impl Iterator<Item = T>) -> String {
    let shown: Vec<String> = values.take(MAX_EXAMPLES).map(|v| v.to_string()).collect();
    format!("[{}]", shown.join(", "))
}
