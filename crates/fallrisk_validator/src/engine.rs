//! Main validation engine.
//!
//! This module provides the `DatasetValidator` that runs every enabled check
//! against a set of fixtures. Fixtures are loaded lazily, at most once per
//! run, and shared read-only by all checks. A fixture that fails to load
//! fails only the checks that need it.

use crate::{
    ConstraintValidator, DataSet, DistributionValidator, FileValidator, ReportValidator,
    SampleValidator, SchemaValidator, ValidationError,
};
use fallrisk_core::{
    CheckKind, CheckResult, DatasetSchema, QualityReport, ValidationConfig, ValidationReport,
    ValidationStats,
};
use fallrisk_parser::{parse_quality_report_file, parse_schema_file};
use std::cell::OnceCell;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

type Loaded<T> = Result<T, ValidationError>;

/// The input files of a run, loaded on first use.
#[derive(Debug, Default)]
pub struct Fixtures {
    paths: Option<FixturePaths>,
    schema: OnceCell<Loaded<DatasetSchema>>,
    dataset: OnceCell<Loaded<DataSet>>,
    sample: OnceCell<Loaded<DataSet>>,
    quality_report: OnceCell<Loaded<QualityReport>>,
}

#[derive(Debug)]
struct FixturePaths {
    schema: PathBuf,
    dataset: PathBuf,
    sample: PathBuf,
    quality_report: PathBuf,
}

impl Fixtures {
    /// Creates fixtures that load from the paths named in `config`.
    pub fn from_config(config: &ValidationConfig) -> Self {
        Self {
            paths: Some(FixturePaths {
                schema: config.schema_path(),
                dataset: config.dataset_path(),
                sample: config.sample_path(),
                quality_report: config.quality_report_path(),
            }),
            ..Default::default()
        }
    }

    /// Creates fixtures from already-loaded values.
    ///
    /// Any fixture left unset reports a load error when a check needs it.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Sets the schema, replacing any earlier value.
    pub fn with_schema(mut self, schema: DatasetSchema) -> Self {
        self.schema = OnceCell::from(Ok(schema));
        self
    }

    /// Sets the full dataset, replacing any earlier value.
    pub fn with_dataset(mut self, dataset: DataSet) -> Self {
        self.dataset = OnceCell::from(Ok(dataset));
        self
    }

    /// Sets the sample dataset, replacing any earlier value.
    pub fn with_sample(mut self, sample: DataSet) -> Self {
        self.sample = OnceCell::from(Ok(sample));
        self
    }

    /// Sets the quality report, replacing any earlier value.
    pub fn with_quality_report(mut self, report: QualityReport) -> Self {
        self.quality_report = OnceCell::from(Ok(report));
        self
    }

    /// Returns the schema, loading it on first use.
    pub fn schema(&self) -> Loaded<&DatasetSchema> {
        self.schema
            .get_or_init(|| {
                let path = self.path(|p| &p.schema, "schema")?;
                parse_schema_file(&path).map_err(|e| ValidationError::load(&path, e))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Returns the full dataset, loading it on first use.
    pub fn dataset(&self) -> Loaded<&DataSet> {
        self.dataset
            .get_or_init(|| DataSet::load_csv(&self.path(|p| &p.dataset, "dataset")?))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Returns the sample dataset, loading it on first use.
    pub fn sample(&self) -> Loaded<&DataSet> {
        self.sample
            .get_or_init(|| DataSet::load_csv(&self.path(|p| &p.sample, "sample")?))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Returns the quality report, loading it on first use.
    pub fn quality_report(&self) -> Loaded<&QualityReport> {
        self.quality_report
            .get_or_init(|| {
                let path = self.path(|p| &p.quality_report, "quality report")?;
                parse_quality_report_file(&path).map_err(|e| ValidationError::load(&path, e))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    fn path(&self, select: impl Fn(&FixturePaths) -> &PathBuf, what: &str) -> Loaded<PathBuf> {
        let path = self
            .paths
            .as_ref()
            .map(select)
            .cloned()
            .ok_or_else(|| ValidationError::Load {
                path: PathBuf::from(format!("<{what}>")),
                message: format!("no {what} provided"),
            })?;
        debug!(path = %path.display(), "loading {what}");
        Ok(path)
    }
}

/// Main validation engine for the dataset.
///
/// # Example
///
/// ```no_run
/// use fallrisk_core::ValidationConfig;
/// use fallrisk_validator::DatasetValidator;
///
/// let validator = DatasetValidator::new(ValidationConfig::default());
/// let report = validator.run();
///
/// if report.passed {
///     println!("Validation passed!");
/// } else {
///     for error in report.errors() {
///         println!("Error: {}", error);
///     }
/// }
/// ```
pub struct DatasetValidator {
    config: ValidationConfig,
}

impl DatasetValidator {
    /// Creates a new dataset validator.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Loads the fixtures named in the config and runs every enabled check.
    pub fn run(&self) -> ValidationReport {
        info!(data_dir = %self.config.data_dir.display(), "validating dataset");
        let fixtures = Fixtures::from_config(&self.config);
        self.run_with(&fixtures)
    }

    /// Runs every enabled check against the given fixtures.
    pub fn run_with(&self, fixtures: &Fixtures) -> ValidationReport {
        let start = Instant::now();

        let checks: Vec<CheckResult> = self
            .config
            .enabled_checks()
            .into_iter()
            .map(|kind| self.run_check(kind, fixtures))
            .collect();

        let stats = ValidationStats {
            records_validated: fixtures
                .dataset
                .get()
                .and_then(|d| d.as_ref().ok())
                .map_or(0, DataSet::len),
            fields_checked: fixtures
                .schema
                .get()
                .and_then(|s| s.as_ref().ok())
                .map_or(0, |s| s.fields.len()),
            checks_run: checks.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        let report = ValidationReport::from_checks(checks, stats);
        info!(
            passed = report.passed,
            failed = report.failed_checks().count(),
            duration_ms = report.stats.duration_ms,
            "validation finished"
        );
        report
    }

    /// Runs a single check.
    pub fn run_check(&self, kind: CheckKind, fixtures: &Fixtures) -> CheckResult {
        let errors = match self.collect_errors(kind, fixtures) {
            Ok(errors) => errors,
            Err(load_error) => vec![load_error],
        };

        if errors.is_empty() {
            debug!(check = %kind, "check passed");
        } else {
            warn!(check = %kind, errors = errors.len(), "check failed");
        }

        CheckResult::from_errors(kind, errors)
    }

    fn collect_errors(&self, kind: CheckKind, fixtures: &Fixtures) -> Loaded<Vec<ValidationError>> {
        let config = &self.config;

        let errors = match kind {
            CheckKind::Existence => FileValidator::new().validate(&[
                config.dataset_path(),
                config.schema_path(),
                config.sample_path(),
                config.quality_report_path(),
            ]),
            CheckKind::SchemaAlignment => SchemaValidator::new(config.column_order)
                .validate(fixtures.schema()?, fixtures.dataset()?),
            CheckKind::FieldConstraints => ConstraintValidator::new(config.tolerances.range_epsilon)
                .validate(fixtures.schema()?, fixtures.dataset()?),
            CheckKind::Percentiles => self.distribution().validate_percentiles(
                fixtures.schema()?,
                fixtures.dataset()?,
                &config.percentile_columns,
            ),
            CheckKind::SampleSubset => SampleValidator::new(config.sample_rows, &config.id_column)
                .validate(fixtures.sample()?, fixtures.dataset()?),
            CheckKind::LabelBalance => self
                .distribution()
                .validate_label_balance(fixtures.dataset()?, &config.label_column),
            CheckKind::QualityReport => {
                let mut errors: Vec<ValidationError> = FileValidator::new()
                    .validate_any(&[
                        config.quality_report_path(),
                        config.quality_report_pickle_path(),
                    ])
                    .into_iter()
                    .collect();
                let validator = ReportValidator::new(
                    config.expected_overall_score,
                    config.tolerances.score_rel,
                    config.tolerances.score_abs,
                );
                match fixtures.quality_report() {
                    Ok(report) => errors.extend(validator.validate(report)),
                    Err(load_error) => errors.push(load_error),
                }
                errors
            }
            CheckKind::UniqueIds => self
                .distribution()
                .validate_unique(fixtures.dataset()?, &config.id_column)
                .into_iter()
                .collect(),
        };

        Ok(errors)
    }

    fn distribution(&self) -> DistributionValidator {
        DistributionValidator::new(
            self.config.tolerances.percentile_rel,
            self.config.tolerances.percentile_abs,
            self.config.label_bounds,
        )
    }
}
