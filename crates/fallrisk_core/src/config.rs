//! Configuration for a validation run.
//!
//! Every field has a default matching the published fall-risk dataset, so an
//! empty config file (or [`ValidationConfig::default`]) validates the assets
//! under `datasets/fallrisk`.

use crate::{CheckKind, DatasetError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default directory holding the dataset assets.
pub const DEFAULT_DATA_DIR: &str = "datasets/fallrisk";

/// Default overall score recorded in the quality report.
pub const DEFAULT_OVERALL_SCORE: f64 = 0.9611989;

/// Numeric columns whose documented percentiles are checked by default.
pub const DEFAULT_PERCENTILE_COLUMNS: [&str; 14] = [
    "age_years",
    "bmi",
    "systolic_bp",
    "gait_speed_m_s",
    "stride_length_cm",
    "postural_sway_cm",
    "medication_count",
    "chronic_conditions",
    "past_falls_6mo",
    "dual_task_cost_percent",
    "fear_of_falling_score",
    "muscle_strength_score",
    "reaction_time_ms",
    "tug_seconds",
];

/// How CSV columns are compared with the schema field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnOrder {
    /// Columns must appear in schema order
    #[default]
    Ordered,
    /// Only the set of column names must match
    Unordered,
}

/// File names of the dataset assets, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureFiles {
    pub dataset: PathBuf,
    pub schema: PathBuf,
    pub sample: PathBuf,
    pub quality_report: PathBuf,
    /// Alternate report artifact accepted by the artifact check
    pub quality_report_pickle: PathBuf,
}

impl Default for FixtureFiles {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("fallrisk_tabular_v1.csv"),
            schema: PathBuf::from("schema.json"),
            sample: PathBuf::from("sample_1k.csv"),
            quality_report: PathBuf::from("reports/quality_report.json"),
            quality_report_pickle: PathBuf::from("reports/quality_report.pkl"),
        }
    }
}

/// Numeric tolerances used by the checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Slack allowed outside declared `[min, max]` ranges
    pub range_epsilon: f64,
    pub percentile_rel: f64,
    pub percentile_abs: f64,
    pub score_rel: f64,
    pub score_abs: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            range_epsilon: 1e-9,
            percentile_rel: 1e-4,
            percentile_abs: 1e-4,
            score_rel: 1e-3,
            score_abs: 1e-12,
        }
    }
}

/// Exclusive bounds on each label class proportion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for LabelBounds {
    fn default() -> Self {
        Self {
            min: 0.01,
            max: 0.98,
        }
    }
}

/// Settings for a validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Directory the fixture files are resolved against
    pub data_dir: PathBuf,

    pub files: FixtureFiles,

    /// Unique key column
    pub id_column: String,

    /// Binary outcome column
    pub label_column: String,

    /// Exact number of rows the sample file must contain
    pub sample_rows: usize,

    pub column_order: ColumnOrder,

    pub tolerances: Tolerances,

    pub label_bounds: LabelBounds,

    pub expected_overall_score: f64,

    pub percentile_columns: Vec<String>,

    /// Checks to run; all checks when unset
    pub checks: Option<Vec<CheckKind>>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            files: FixtureFiles::default(),
            id_column: "participant_id".to_string(),
            label_column: "label_high_fall_risk".to_string(),
            sample_rows: 1000,
            column_order: ColumnOrder::default(),
            tolerances: Tolerances::default(),
            label_bounds: LabelBounds::default(),
            expected_overall_score: DEFAULT_OVERALL_SCORE,
            percentile_columns: DEFAULT_PERCENTILE_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            checks: None,
        }
    }
}

impl ValidationConfig {
    /// Creates a new builder starting from the defaults.
    pub fn builder() -> ValidationConfigBuilder {
        ValidationConfigBuilder::default()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.id_column.trim().is_empty() {
            return Err(DatasetError::config("id_column cannot be empty"));
        }

        if self.label_column.trim().is_empty() {
            return Err(DatasetError::config("label_column cannot be empty"));
        }

        let bounds = self.label_bounds;
        if !(0.0..=1.0).contains(&bounds.min) || !(0.0..=1.0).contains(&bounds.max) {
            return Err(DatasetError::config(format!(
                "label_bounds must lie in [0, 1], got ({}, {})",
                bounds.min, bounds.max
            )));
        }
        if bounds.min >= bounds.max {
            return Err(DatasetError::config(format!(
                "label_bounds.min ({}) must be below label_bounds.max ({})",
                bounds.min, bounds.max
            )));
        }

        let tol = self.tolerances;
        for (name, value) in [
            ("range_epsilon", tol.range_epsilon),
            ("percentile_rel", tol.percentile_rel),
            ("percentile_abs", tol.percentile_abs),
            ("score_rel", tol.score_rel),
            ("score_abs", tol.score_abs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DatasetError::config(format!(
                    "tolerance {name} must be a non-negative number, got {value}"
                )));
            }
        }

        let score = self.expected_overall_score;
        if !score.is_finite() || score < 0.0 {
            return Err(DatasetError::config(format!(
                "expected_overall_score must be a non-negative number, got {score}"
            )));
        }

        if let Some(checks) = &self.checks {
            if checks.is_empty() {
                return Err(DatasetError::config("checks list cannot be empty"));
            }
        }

        Ok(())
    }

    /// Whether a check is enabled for this run.
    pub fn runs(&self, kind: CheckKind) -> bool {
        self.checks.as_ref().is_none_or(|checks| checks.contains(&kind))
    }

    /// Returns the checks enabled for this run, in run order.
    pub fn enabled_checks(&self) -> Vec<CheckKind> {
        CheckKind::ALL
            .into_iter()
            .filter(|kind| self.runs(*kind))
            .collect()
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        self.data_dir.join(file)
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.resolve(&self.files.dataset)
    }

    pub fn schema_path(&self) -> PathBuf {
        self.resolve(&self.files.schema)
    }

    pub fn sample_path(&self) -> PathBuf {
        self.resolve(&self.files.sample)
    }

    pub fn quality_report_path(&self) -> PathBuf {
        self.resolve(&self.files.quality_report)
    }

    pub fn quality_report_pickle_path(&self) -> PathBuf {
        self.resolve(&self.files.quality_report_pickle)
    }
}

/// Builder for `ValidationConfig`.
#[derive(Debug, Clone, Default)]
pub struct ValidationConfigBuilder {
    config: ValidationConfig,
}

impl ValidationConfigBuilder {
    /// Starts from an existing configuration (e.g. one loaded from a file).
    pub fn from_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Sets the data directory.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    /// Sets the fixture file names.
    pub fn files(mut self, files: FixtureFiles) -> Self {
        self.config.files = files;
        self
    }

    /// Sets the unique key column.
    pub fn id_column(mut self, column: impl Into<String>) -> Self {
        self.config.id_column = column.into();
        self
    }

    /// Sets the binary label column.
    pub fn label_column(mut self, column: impl Into<String>) -> Self {
        self.config.label_column = column.into();
        self
    }

    /// Sets the exact row count expected in the sample file.
    pub fn sample_rows(mut self, rows: usize) -> Self {
        self.config.sample_rows = rows;
        self
    }

    /// Sets the column comparison mode.
    pub fn column_order(mut self, order: ColumnOrder) -> Self {
        self.config.column_order = order;
        self
    }

    pub fn tolerances(mut self, tolerances: Tolerances) -> Self {
        self.config.tolerances = tolerances;
        self
    }

    pub fn label_bounds(mut self, min: f64, max: f64) -> Self {
        self.config.label_bounds = LabelBounds { min, max };
        self
    }

    /// Sets the overall score the quality report must carry.
    pub fn expected_overall_score(mut self, score: f64) -> Self {
        self.config.expected_overall_score = score;
        self
    }

    /// Replaces the list of percentile-checked columns.
    pub fn percentile_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.percentile_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts the run to the given checks.
    pub fn only(mut self, checks: impl IntoIterator<Item = CheckKind>) -> Self {
        let mut checks: Vec<CheckKind> = checks.into_iter().collect();
        checks.sort();
        checks.dedup();
        self.config.checks = Some(checks);
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<ValidationConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_paths() {
        let config = ValidationConfig::default();
        assert_eq!(
            config.dataset_path(),
            PathBuf::from("datasets/fallrisk/fallrisk_tabular_v1.csv")
        );
        assert_eq!(
            config.quality_report_path(),
            PathBuf::from("datasets/fallrisk/reports/quality_report.json")
        );
        assert_eq!(config.percentile_columns.len(), 14);
        assert_eq!(config.sample_rows, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ValidationConfig::builder()
            .data_dir("/tmp/data")
            .sample_rows(10)
            .column_order(ColumnOrder::Unordered)
            .percentile_columns(["bmi"])
            .build()
            .unwrap();

        assert_eq!(config.schema_path(), PathBuf::from("/tmp/data/schema.json"));
        assert_eq!(config.sample_rows, 10);
        assert_eq!(config.column_order, ColumnOrder::Unordered);
        assert_eq!(config.percentile_columns, vec!["bmi".to_string()]);
    }

    #[test]
    fn test_only_restricts_checks() {
        let config = ValidationConfig::builder()
            .only([CheckKind::LabelBalance, CheckKind::Existence, CheckKind::Existence])
            .build()
            .unwrap();

        assert!(config.runs(CheckKind::Existence));
        assert!(!config.runs(CheckKind::Percentiles));
        assert_eq!(
            config.enabled_checks(),
            vec![CheckKind::Existence, CheckKind::LabelBalance]
        );
        assert_eq!(ValidationConfig::default().enabled_checks().len(), 8);
    }

    #[test]
    fn test_invalid_label_bounds() {
        let result = ValidationConfig::builder().label_bounds(0.9, 0.1).build();
        assert!(matches!(result, Err(DatasetError::InvalidConfig(_))));

        let result = ValidationConfig::builder().label_bounds(-0.1, 0.5).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_tolerance() {
        let result = ValidationConfig::builder()
            .tolerances(Tolerances {
                percentile_rel: -1.0,
                ..Tolerances::default()
            })
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_expected_score() {
        for score in [f64::NAN, f64::INFINITY, -0.5] {
            let result = ValidationConfig::builder()
                .expected_overall_score(score)
                .build();
            assert!(
                matches!(result, Err(DatasetError::InvalidConfig(_))),
                "score {score} accepted"
            );
        }
        assert!(ValidationConfig::builder().expected_overall_score(0.0).build().is_ok());
    }

    #[test]
    fn test_empty_id_column() {
        assert!(ValidationConfig::builder().id_column(" ").build().is_err());
    }

    #[test]
    fn test_empty_check_list() {
        assert!(ValidationConfig::builder().only([]).build().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ValidationConfig =
            serde_json::from_str(r#"{"sample_rows": 50, "files": {"dataset": "data.csv"}}"#)
                .unwrap();
        assert_eq!(config.sample_rows, 50);
        assert_eq!(config.files.dataset, PathBuf::from("data.csv"));
        assert_eq!(config.files.schema, PathBuf::from("schema.json"));
        assert_eq!(config.label_column, "label_high_fall_risk");
    }
}
