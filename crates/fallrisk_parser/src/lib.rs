//! Loaders for the fall-risk dataset's schema, quality report and run config.
//!
//! Schemas are normally JSON (`schema.json`), but YAML and TOML renditions
//! are accepted too; the format is picked from the file extension. Quality
//! reports are always JSON. Run configs may be TOML, YAML or JSON.
//!
//! # Example
//!
//! ```rust
//! use fallrisk_parser::parse_schema_json;
//!
//! let json = r#"{
//!     "rows": 1000,
//!     "fields": {
//!         "participant_id": {"type": "string"},
//!         "label_high_fall_risk": {"type": "binary"}
//!     }
//! }"#;
//!
//! let schema = parse_schema_json(json).expect("Failed to parse schema");
//! assert_eq!(schema.rows, 1000);
//! assert_eq!(schema.fields[1].name, "label_high_fall_risk");
//! ```

use fallrisk_core::{DatasetSchema, QualityReport, ValidationConfig};
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading schema, report or config files.
#[derive(Debug, Error)]
pub enum ParserError {
    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file kind does not support this format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// The loaded config failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] fallrisk_core::DatasetError),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Detect the file format from a path based on its extension.
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<FileFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "json" => Ok(FileFormat::Json),
        "yaml" | "yml" => Ok(FileFormat::Yaml),
        "toml" => Ok(FileFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

fn parse_str<T: DeserializeOwned>(content: &str, format: FileFormat) -> Result<T> {
    match format {
        FileFormat::Json => Ok(serde_json::from_str(content)?),
        FileFormat::Yaml => Ok(serde_yaml_ng::from_str(content)?),
        FileFormat::Toml => {
            toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))
        }
    }
}

fn read_with_format(path: &Path) -> Result<(String, FileFormat)> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), ?format, bytes = content.len(), "read file");
    Ok((content, format))
}

/// Parse a schema from a JSON string.
pub fn parse_schema_json(content: &str) -> Result<DatasetSchema> {
    parse_str(content, FileFormat::Json)
}

/// Parse a schema from a YAML string.
///
/// ```rust
/// use fallrisk_parser::parse_schema_yaml;
///
/// let yaml = r#"
/// rows: 2
/// fields:
///   participant_id:
///     type: string
///   bmi:
///     type: float
///     range: [10, 60]
/// "#;
///
/// let schema = parse_schema_yaml(yaml).unwrap();
/// assert_eq!(schema.field("bmi").unwrap().range.unwrap().max, 60.0);
/// ```
pub fn parse_schema_yaml(content: &str) -> Result<DatasetSchema> {
    parse_str(content, FileFormat::Yaml)
}

/// Parse a schema from a TOML string.
///
/// Column order follows the order in which the TOML parser yields keys.
pub fn parse_schema_toml(content: &str) -> Result<DatasetSchema> {
    parse_str(content, FileFormat::Toml)
}

/// Parse a schema file with automatic format detection.
///
/// ```no_run
/// use fallrisk_parser::parse_schema_file;
/// use std::path::Path;
///
/// let schema = parse_schema_file(Path::new("datasets/fallrisk/schema.json")).unwrap();
/// println!("Schema declares {} rows", schema.rows);
/// ```
pub fn parse_schema_file(path: &Path) -> Result<DatasetSchema> {
    let (content, format) = read_with_format(path)?;
    parse_str(&content, format)
}

/// Parse a quality report from a JSON string.
pub fn parse_quality_report(content: &str) -> Result<QualityReport> {
    parse_str(content, FileFormat::Json)
}

/// Parse a quality report file. Only JSON reports are readable.
pub fn parse_quality_report_file(path: &Path) -> Result<QualityReport> {
    let (content, format) = read_with_format(path)?;
    if format != FileFormat::Json {
        return Err(ParserError::UnsupportedFormat(format!(
            "{format:?} quality reports are not supported"
        )));
    }
    parse_quality_report(&content)
}

/// Parse a run config from a string in the given format.
///
/// Missing keys take their defaults; the result is validated.
pub fn parse_config(content: &str, format: FileFormat) -> Result<ValidationConfig> {
    let config: ValidationConfig = parse_str(content, format)?;
    config.validate()?;
    Ok(config)
}

/// Parse a run config file with automatic format detection.
pub fn parse_config_file(path: &Path) -> Result<ValidationConfig> {
    let (content, format) = read_with_format(path)?;
    parse_config(&content, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fallrisk_core::{CategoryValue, CheckKind, ColumnOrder, FieldType, ValueRange};
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::path::PathBuf;

    const SCHEMA_JSON: &str = r#"{
        "rows": 3,
        "fields": {
            "participant_id": {"type": "string"},
            "sex": {"type": "categorical", "values": ["female", "male"]},
            "age_years": {"type": "float", "range": [60, 100]},
            "label_high_fall_risk": {"type": "binary"}
        },
        "percentile_thresholds": {
            "age_years": {"p10": 62.0, "p25": 66.5, "p50": 72.0, "p75": 79.0, "p90": 85.5}
        }
    }"#;

    #[test]
    fn test_parse_schema_json() {
        let schema = parse_schema_json(SCHEMA_JSON).expect("Failed to parse schema");

        assert_eq!(schema.rows, 3);
        assert_eq!(
            schema.field_names().collect::<Vec<_>>(),
            vec!["participant_id", "sex", "age_years", "label_high_fall_risk"]
        );
        assert_eq!(
            schema.field("age_years").unwrap().range,
            Some(ValueRange::new(60.0, 100.0))
        );
        assert_eq!(schema.thresholds_for("age_years").unwrap().p90, 85.5);
    }

    #[test]
    fn test_parse_schema_yaml_keeps_order() {
        let yaml = r#"
rows: 10
fields:
  zeta:
    type: integer
  alpha:
    type: categorical
    values: [1, 2, 3]
"#;

        let schema = parse_schema_yaml(yaml).expect("Failed to parse YAML schema");
        assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(schema.fields[0].field_type, FieldType::Integer);
        assert_eq!(
            schema.fields[1].values,
            Some(vec![
                CategoryValue::Integer(1),
                CategoryValue::Integer(2),
                CategoryValue::Integer(3)
            ])
        );
    }

    #[test]
    fn test_parse_schema_toml() {
        let toml = r#"
rows = 5

[fields.participant_id]
type = "string"

[percentile_thresholds.bmi]
p10 = 20.0
p25 = 22.0
p50 = 25.0
p75 = 28.0
p90 = 31.0
"#;

        let schema = parse_schema_toml(toml).expect("Failed to parse TOML schema");
        assert_eq!(schema.rows, 5);
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(schema.thresholds_for("bmi").unwrap().p25, 22.0);
    }

    #[test]
    fn test_parse_schema_invalid_json() {
        let result = parse_schema_json("{ not json");
        assert!(matches!(result, Err(ParserError::JsonError(_))));
    }

    #[test]
    fn test_parse_schema_missing_rows() {
        let result = parse_schema_json(r#"{"fields": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_schema_invalid_toml() {
        let result = parse_schema_toml("rows = ");
        assert!(matches!(result, Err(ParserError::TomlError(_))));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("schema.json")).unwrap(), FileFormat::Json);
        assert_eq!(detect_format(Path::new("schema.YML")).unwrap(), FileFormat::Yaml);
        assert_eq!(detect_format(Path::new("run.toml")).unwrap(), FileFormat::Toml);
        assert!(matches!(
            detect_format(Path::new("schema")),
            Err(ParserError::InvalidExtension)
        ));
        assert!(matches!(
            detect_format(Path::new("report.pkl")),
            Err(ParserError::UnsupportedFormat(ext)) if ext == "pkl"
        ));
    }

    #[test]
    fn test_parse_schema_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(SCHEMA_JSON.as_bytes()).unwrap();

        let schema = parse_schema_file(file.path()).expect("Failed to parse schema file");
        assert_eq!(schema.fields.len(), 4);
    }

    #[test]
    fn test_parse_schema_file_missing() {
        let result = parse_schema_file(Path::new("/nonexistent/schema.json"));
        assert!(matches!(result, Err(ParserError::IoError(_))));
    }

    #[test]
    fn test_parse_quality_report() {
        let report = parse_quality_report(r#"{"overall_score": 0.9611989, "n_rows": 2000}"#)
            .expect("Failed to parse report");
        assert_eq!(report.overall_score, 0.9611989);
        assert!(report.section("n_rows").is_some());
    }

    #[test]
    fn test_parse_quality_report_file_rejects_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"overall_score: 0.9").unwrap();

        let result = parse_quality_report_file(file.path());
        assert!(matches!(result, Err(ParserError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_parse_config_toml() {
        let toml = r#"
data_dir = "/srv/fallrisk"
sample_rows = 250
column_order = "unordered"
checks = ["existence", "label_balance"]

[tolerances]
percentile_rel = 0.001
"#;

        let config = parse_config(toml, FileFormat::Toml).expect("Failed to parse config");
        assert_eq!(config.data_dir, PathBuf::from("/srv/fallrisk"));
        assert_eq!(config.sample_rows, 250);
        assert_eq!(config.column_order, ColumnOrder::Unordered);
        assert_eq!(
            config.checks,
            Some(vec![CheckKind::Existence, CheckKind::LabelBalance])
        );
        assert_eq!(config.tolerances.percentile_rel, 0.001);
        assert_eq!(config.tolerances.range_epsilon, 1e-9);
    }

    #[test]
    fn test_parse_config_yaml_invalid_bounds() {
        let yaml = "label_bounds:\n  min: 0.5\n  max: 0.4\n";
        let result = parse_config(yaml, FileFormat::Yaml);
        assert!(matches!(result, Err(ParserError::InvalidConfig(_))));
    }

    #[test]
    fn test_parse_config_nan_score_rejected() {
        let result = parse_config("expected_overall_score = nan", FileFormat::Toml);
        assert!(matches!(result, Err(ParserError::InvalidConfig(_))));
    }

    #[test]
    fn test_parse_config_unknown_check() {
        let result = parse_config(r#"checks = ["freshness"]"#, FileFormat::Toml);
        assert!(matches!(result, Err(ParserError::TomlError(_))));
    }
}
