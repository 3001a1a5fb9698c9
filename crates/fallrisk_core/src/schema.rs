//! Dataset schema types.
//!
//! A schema is the declared structural and statistical contract for the
//! dataset: the expected row count, one spec per column (in column order),
//! and the documented percentiles of selected numeric columns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Declared contract for a tabular dataset.
///
/// # Example
///
/// ```rust
/// use fallrisk_core::{DatasetSchema, FieldType};
///
/// let json = r#"{
///     "rows": 3,
///     "fields": {
///         "participant_id": {"type": "string"},
///         "age_years": {"type": "float", "range": [60, 100]}
///     },
///     "percentile_thresholds": {}
/// }"#;
///
/// let schema: DatasetSchema = serde_json::from_str(json).unwrap();
/// assert_eq!(schema.rows, 3);
/// assert_eq!(schema.field_names().collect::<Vec<_>>(), ["participant_id", "age_years"]);
/// assert_eq!(schema.fields[1].field_type, FieldType::Float);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchema {
    /// Number of rows the full dataset must contain
    pub rows: usize,

    /// Field definitions, in declared column order
    #[serde(with = "ordered_fields")]
    pub fields: Vec<Field>,

    /// Documented percentiles keyed by column name
    #[serde(default)]
    pub percentile_thresholds: BTreeMap<String, PercentileThresholds>,
}

impl DatasetSchema {
    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the declared field names in column order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns all fields declared with the given type.
    pub fn fields_of_type(&self, field_type: FieldType) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(move |f| f.field_type == field_type)
    }

    /// Returns the documented percentiles for a column, if any.
    pub fn thresholds_for(&self, column: &str) -> Option<&PercentileThresholds> {
        self.percentile_thresholds.get(column)
    }
}

/// The declared type of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Real-valued measurement
    Float,
    /// Whole-number count or score
    Integer,
    /// 0/1 indicator
    Binary,
    /// One of a declared value set
    Categorical,
    /// Free text or identifier
    String,
}

impl FieldType {
    /// Every field type, in declaration order.
    pub const ALL: [FieldType; 5] = [
        FieldType::Float,
        FieldType::Integer,
        FieldType::Binary,
        FieldType::Categorical,
        FieldType::String,
    ];

    /// Whether columns of this type must load with a numeric dtype.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            FieldType::Float | FieldType::Integer | FieldType::Binary
        )
    }

    /// Returns the lowercase name used in schema files.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Float => "float",
            FieldType::Integer => "integer",
            FieldType::Binary => "binary",
            FieldType::Categorical => "categorical",
            FieldType::String => "string",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Column name
    pub name: String,

    /// Declared type
    pub field_type: FieldType,

    /// Allowed values for categorical columns
    pub values: Option<Vec<CategoryValue>>,

    /// Inclusive numeric bounds
    pub range: Option<ValueRange>,

    /// Optional human-readable description
    pub description: Option<String>,
}

/// Field body as it appears under its name in a schema file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FieldSpec {
    #[serde(rename = "type")]
    field_type: FieldType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    values: Option<Vec<CategoryValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    range: Option<ValueRange>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl FieldSpec {
    fn into_field(self, name: String) -> Field {
        Field {
            name,
            field_type: self.field_type,
            values: self.values,
            range: self.range,
            description: self.description,
        }
    }
}

impl From<&Field> for FieldSpec {
    fn from(field: &Field) -> Self {
        Self {
            field_type: field.field_type,
            values: field.values.clone(),
            range: field.range,
            description: field.description.clone(),
        }
    }
}

/// A declared categorical value.
///
/// Schema files may list categories as numbers or strings; a CSV cell
/// matches a category only when both are numeric and equal, or both are
/// text and equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryValue {
    /// Whole-number category
    Integer(i64),
    /// Real-valued category
    Float(f64),
    /// Text category
    Text(String),
}

impl CategoryValue {
    /// Returns the numeric value of this category, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CategoryValue::Integer(i) => Some(*i as f64),
            CategoryValue::Float(f) => Some(*f),
            CategoryValue::Text(_) => None,
        }
    }

    /// Returns the text of this category, if it is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CategoryValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValue::Integer(i) => write!(f, "{i}"),
            CategoryValue::Float(v) => write!(f, "{v}"),
            CategoryValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CategoryValue {
    fn from(s: &str) -> Self {
        CategoryValue::Text(s.to_string())
    }
}

impl From<i64> for CategoryValue {
    fn from(i: i64) -> Self {
        CategoryValue::Integer(i)
    }
}

/// Inclusive `[min, max]` bounds, written as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct ValueRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl From<(f64, f64)> for ValueRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<ValueRange> for (f64, f64) {
    fn from(range: ValueRange) -> Self {
        (range.min, range.max)
    }
}

/// Documented quantiles of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileThresholds {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

impl PercentileThresholds {
    /// Quantile levels matching `p10` through `p90`.
    pub const LEVELS: [f64; 5] = [0.1, 0.25, 0.5, 0.75, 0.9];

    /// Returns `(label, quantile, expected value)` for each threshold.
    pub fn entries(&self) -> [(&'static str, f64, f64); 5] {
        [
            ("p10", 0.1, self.p10),
            ("p25", 0.25, self.p25),
            ("p50", 0.5, self.p50),
            ("p75", 0.75, self.p75),
            ("p90", 0.9, self.p90),
        ]
    }
}

/// (De)serializes `fields` as a JSON object while keeping document order.
mod ordered_fields {
    use super::{Field, FieldSpec};
    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(fields: &[Field], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for field in fields {
            map.serialize_entry(&field.name, &FieldSpec::from(field))?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Field>, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = Vec<Field>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to field specs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut fields: Vec<Field> = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, spec)) = access.next_entry::<String, FieldSpec>()? {
                    if fields.iter().any(|f| f.name == name) {
                        return Err(de::Error::custom(format!("duplicate field '{name}'")));
                    }
                    fields.push(spec.into_field(name));
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCHEMA_JSON: &str = r#"{
        "rows": 2000,
        "fields": {
            "participant_id": {"type": "string", "description": "Pseudonymous id"},
            "sex": {"type": "categorical", "values": ["female", "male"]},
            "bmi": {"type": "float", "range": [14.5, 48.0]},
            "past_falls_6mo": {"type": "integer", "range": [0, 6]},
            "label_high_fall_risk": {"type": "binary"}
        },
        "percentile_thresholds": {
            "bmi": {"p10": 21.2, "p25": 23.9, "p50": 26.8, "p75": 29.9, "p90": 33.1}
        }
    }"#;

    #[test]
    fn test_fields_keep_document_order() {
        let schema: DatasetSchema = serde_json::from_str(SCHEMA_JSON).unwrap();
        assert_eq!(
            schema.field_names().collect::<Vec<_>>(),
            vec![
                "participant_id",
                "sex",
                "bmi",
                "past_falls_6mo",
                "label_high_fall_risk"
            ]
        );
    }

    #[test]
    fn test_field_specs_parsed() {
        let schema: DatasetSchema = serde_json::from_str(SCHEMA_JSON).unwrap();

        let bmi = schema.field("bmi").unwrap();
        assert_eq!(bmi.field_type, FieldType::Float);
        assert_eq!(bmi.range, Some(ValueRange::new(14.5, 48.0)));

        let sex = schema.field("sex").unwrap();
        assert_eq!(
            sex.values,
            Some(vec![CategoryValue::from("female"), CategoryValue::from("male")])
        );

        let falls = schema.field("past_falls_6mo").unwrap();
        assert_eq!(falls.range, Some(ValueRange::new(0.0, 6.0)));

        assert_eq!(
            schema.field("participant_id").unwrap().description.as_deref(),
            Some("Pseudonymous id")
        );
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_percentile_thresholds() {
        let schema: DatasetSchema = serde_json::from_str(SCHEMA_JSON).unwrap();
        let bmi = schema.thresholds_for("bmi").unwrap();
        assert_eq!(bmi.entries()[2], ("p50", 0.5, 26.8));
        assert!(schema.thresholds_for("sex").is_none());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let json = r#"{"rows": 1, "fields": {"a": {"type": "float"}, "a": {"type": "string"}}}"#;
        let err = serde_json::from_str::<DatasetSchema>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate field 'a'"));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{"rows": 1, "fields": {"a": {"type": "timestamp"}}}"#;
        assert!(serde_json::from_str::<DatasetSchema>(json).is_err());
    }

    #[test]
    fn test_serialize_preserves_order() {
        let schema: DatasetSchema = serde_json::from_str(SCHEMA_JSON).unwrap();
        let text = serde_json::to_string(&schema).unwrap();
        let id_pos = text.find("participant_id").unwrap();
        let label_pos = text.find("label_high_fall_risk").unwrap();
        assert!(id_pos < label_pos);

        let reparsed: DatasetSchema = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed, schema);
    }

    #[test]
    fn test_numeric_types() {
        assert!(FieldType::Float.is_numeric());
        assert!(FieldType::Integer.is_numeric());
        assert!(FieldType::Binary.is_numeric());
        assert!(!FieldType::Categorical.is_numeric());
        assert!(!FieldType::String.is_numeric());
    }

    #[test]
    fn test_numeric_categories() {
        let values: Vec<CategoryValue> = serde_json::from_str(r#"[1, 2.5, "3"]"#).unwrap();
        assert_eq!(values[0].as_f64(), Some(1.0));
        assert_eq!(values[1].as_f64(), Some(2.5));
        assert_eq!(values[2].as_f64(), None);
        assert_eq!(values[2].as_text(), Some("3"));
    }
}
