//! Error types for the core data model.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Main error type for schema and configuration handling.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Configuration values are inconsistent or out of bounds
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A check name did not match any known check
    #[error(
        "Unknown check '{0}' (expected one of: {expected})",
        expected = crate::CheckKind::names().join(", ")
    )]
    UnknownCheck(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DatasetError {
    /// Creates a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
