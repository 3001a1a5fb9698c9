//! Builder pattern for creating dataset schemas.
//!
//! This module provides fluent builders for constructing schemas in code,
//! mostly useful for tests and for tools that generate schema files.

use crate::{CategoryValue, DatasetSchema, Field, FieldType, PercentileThresholds, ValueRange};
use std::collections::BTreeMap;

/// Builder for creating a `DatasetSchema`.
///
/// # Example
///
/// ```rust
/// use fallrisk_core::{FieldBuilder, FieldType, SchemaBuilder};
///
/// let schema = SchemaBuilder::new(2000)
///     .field(FieldBuilder::new("participant_id", FieldType::String).build())
///     .field(
///         FieldBuilder::new("age_years", FieldType::Float)
///             .range(60.0, 100.0)
///             .build(),
///     )
///     .build();
///
/// assert_eq!(schema.fields.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    rows: usize,
    fields: Vec<Field>,
    percentile_thresholds: BTreeMap<String, PercentileThresholds>,
}

impl SchemaBuilder {
    /// Creates a new schema builder for a dataset with `rows` rows.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    /// Appends a field; fields keep insertion order.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Documents the percentiles of a column.
    pub fn percentiles(
        mut self,
        column: impl Into<String>,
        thresholds: PercentileThresholds,
    ) -> Self {
        self.percentile_thresholds.insert(column.into(), thresholds);
        self
    }

    /// Builds the schema.
    pub fn build(self) -> DatasetSchema {
        DatasetSchema {
            rows: self.rows,
            fields: self.fields,
            percentile_thresholds: self.percentile_thresholds,
        }
    }
}

/// Builder for creating a `Field`.
///
/// # Example
///
/// ```rust
/// use fallrisk_core::{FieldBuilder, FieldType};
///
/// let field = FieldBuilder::new("sex", FieldType::Categorical)
///     .values(["female", "male"])
///     .description("Self-reported sex")
///     .build();
///
/// assert_eq!(field.values.unwrap().len(), 2);
/// ```
#[derive(Debug)]
pub struct FieldBuilder {
    name: String,
    field_type: FieldType,
    values: Option<Vec<CategoryValue>>,
    range: Option<ValueRange>,
    description: Option<String>,
}

impl FieldBuilder {
    /// Creates a new field builder.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            values: None,
            range: None,
            description: None,
        }
    }

    /// Sets the allowed categorical values.
    pub fn values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CategoryValue>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the inclusive numeric range.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some(ValueRange::new(min, max));
        self
    }

    /// Sets the field description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builds the field.
    pub fn build(self) -> Field {
        Field {
            name: self.name,
            field_type: self.field_type,
            values: self.values,
            range: self.range,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schema_builder() {
        let schema = SchemaBuilder::new(3)
            .field(FieldBuilder::new("participant_id", FieldType::String).build())
            .field(
                FieldBuilder::new("bmi", FieldType::Float)
                    .range(10.0, 60.0)
                    .build(),
            )
            .percentiles(
                "bmi",
                PercentileThresholds {
                    p10: 20.0,
                    p25: 22.0,
                    p50: 25.0,
                    p75: 28.0,
                    p90: 31.0,
                },
            )
            .build();

        assert_eq!(schema.rows, 3);
        assert_eq!(
            schema.field_names().collect::<Vec<_>>(),
            vec!["participant_id", "bmi"]
        );
        assert_eq!(schema.thresholds_for("bmi").unwrap().p50, 25.0);
    }

    #[test]
    fn test_field_builder_values() {
        let field = FieldBuilder::new("fall_history", FieldType::Categorical)
            .values([0i64, 1, 2])
            .build();

        assert_eq!(
            field.values,
            Some(vec![
                CategoryValue::Integer(0),
                CategoryValue::Integer(1),
                CategoryValue::Integer(2)
            ])
        );
        assert_eq!(field.range, None);
        assert_eq!(field.description, None);
    }
}
