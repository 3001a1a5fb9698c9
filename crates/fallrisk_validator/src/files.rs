//! Presence checks for the files a dataset release must ship.

use crate::ValidationError;
use std::path::{Path, PathBuf};

/// Checks that dataset assets are present on disk.
pub struct FileValidator;

impl FileValidator {
    /// Creates a new file validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates that every path exists, is a file and is non-empty.
    ///
    /// Returns one error per offending path.
    pub fn validate<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<ValidationError> {
        paths
            .iter()
            .filter_map(|p| self.check_file(p.as_ref()))
            .collect()
    }

    fn check_file(&self, path: &Path) -> Option<ValidationError> {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(_) => return Some(ValidationError::missing_file(path, "file does not exist")),
        };

        if !metadata.is_file() {
            return Some(ValidationError::missing_file(path, "path is not a regular file"));
        }

        if metadata.len() == 0 {
            return Some(ValidationError::missing_file(path, "file is empty"));
        }

        None
    }

    /// Validates that at least one of the candidate artifacts exists.
    pub fn validate_any(&self, candidates: &[PathBuf]) -> Option<ValidationError> {
        if candidates.iter().any(|p| p.exists()) {
            return None;
        }

        let listed = candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let first = candidates.first().cloned().unwrap_or_default();
        Some(ValidationError::missing_file(
            first,
            format!("no report artifact found (looked for: {listed})"),
        ))
    }
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_present_files_pass() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "id\n1\n").unwrap();

        assert!(FileValidator::new().validate(&[&path]).is_empty());
    }

    #[test]
    fn test_missing_and_empty_files() {
        let dir = TempDir::new().unwrap();
        let empty = dir.path().join("sample_1k.csv");
        fs::write(&empty, "").unwrap();
        let missing = dir.path().join("schema.json");

        let errors = FileValidator::new().validate(&[&empty, &missing]);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("sample_1k.csv"));
        assert!(errors[0].to_string().contains("empty"));
        assert!(errors[1].to_string().contains("schema.json"));
        assert!(errors[1].to_string().contains("does not exist"));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        let errors = FileValidator::new().validate(&[dir.path()]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_validate_any() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("quality_report.json");
        let pkl = dir.path().join("quality_report.pkl");

        let err = FileValidator::new()
            .validate_any(&[json.clone(), pkl.clone()])
            .unwrap();
        assert!(err.to_string().contains("quality_report.pkl"));

        fs::write(&pkl, [0x80, 0x04]).unwrap();
        assert!(FileValidator::new().validate_any(&[json, pkl]).is_none());
    }
}
