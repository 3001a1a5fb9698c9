//! Error types for validation operations.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single violated dataset property.
///
/// Every variant names the offending file or column so that failures can be
/// reported individually.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required file is absent or empty
    #[error("Missing expected asset {}: {reason}", .path.display())]
    MissingFile { path: PathBuf, reason: String },

    /// Columns or row count disagree with the schema
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Wrong dtype, non-integral, out-of-range or disallowed values
    #[error("Type constraint violated for column '{column}': {message}")]
    TypeConstraint { column: String, message: String },

    /// Imbalanced label or percentile drift
    #[error("Distribution check failed for column '{column}': {message}")]
    Distribution { column: String, message: String },

    /// Key column holds repeated values
    #[error("Duplicate values in key column '{column}': {message}")]
    DuplicateKey { column: String, message: String },

    /// Quality report disagrees with the expected values
    #[error("Quality report mismatch: {0}")]
    ReportMismatch(String),

    /// A fixture could not be read or parsed
    #[error("Failed to load {}: {message}", .path.display())]
    Load { path: PathBuf, message: String },
}

impl ValidationError {
    /// Creates a new missing file error.
    pub fn missing_file(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MissingFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new schema mismatch error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::SchemaMismatch(message.into())
    }

    /// Creates a new type constraint error.
    pub fn type_constraint(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TypeConstraint {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Creates a new distribution error.
    pub fn distribution(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Distribution {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Creates a new duplicate key error.
    pub fn duplicate_key(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DuplicateKey {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Creates a new report mismatch error.
    pub fn report(message: impl Into<String>) -> Self {
        Self::ReportMismatch(message.into())
    }

    /// Creates a new load error.
    pub fn load(path: &Path, error: impl std::fmt::Display) -> Self {
        Self::Load {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }

    /// Returns the column this error refers to, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::TypeConstraint { column, .. }
            | Self::Distribution { column, .. }
            | Self::DuplicateKey { column, .. } => Some(column),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = ValidationError::missing_file("data/sample_1k.csv", "file is empty");
        assert_eq!(
            err.to_string(),
            "Missing expected asset data/sample_1k.csv: file is empty"
        );

        let err = ValidationError::type_constraint("bmi", "bmi should be numeric");
        assert!(err.to_string().contains("'bmi'"));
        assert_eq!(err.column(), Some("bmi"));

        let err = ValidationError::load(Path::new("schema.json"), "expected value");
        assert_eq!(err.to_string(), "Failed to load schema.json: expected value");
        assert_eq!(err.column(), None);
    }
}
