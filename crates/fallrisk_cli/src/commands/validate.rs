use anyhow::{Context, Result};
use fallrisk_core::{CheckKind, ColumnOrder, ValidationConfig, ValidationConfigBuilder};
use fallrisk_parser::parse_config_file;
use fallrisk_validator::DatasetValidator;
use std::path::PathBuf;
use tracing::info;

use crate::output;

pub struct ValidateArgs {
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub format: String,
    pub only: Vec<CheckKind>,
    pub unordered_columns: bool,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    let config = load_config(&args)?;
    info!("Data directory: {}", config.data_dir.display());
    info!("Checks: {:?}", config.enabled_checks());

    if args.format == "text" {
        output::print_info(&format!(
            "Validating dataset in {} ({} checks)",
            config.data_dir.display(),
            config.enabled_checks().len()
        ));
    }

    let report = DatasetValidator::new(config).run();
    output::print_validation_report(&report, &args.format)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}

/// Builds the run config: file (or defaults), then command-line overrides.
fn load_config(args: &ValidateArgs) -> Result<ValidationConfig> {
    let base = match &args.config {
        Some(path) => parse_config_file(path)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
        None => ValidationConfig::default(),
    };

    let mut builder = ValidationConfigBuilder::from_config(base);
    if let Some(dir) = &args.data_dir {
        builder = builder.data_dir(dir);
    }
    if !args.only.is_empty() {
        builder = builder.only(args.only.iter().copied());
    }
    if args.unordered_columns {
        builder = builder.column_order(ColumnOrder::Unordered);
    }

    builder.build().context("Invalid validation configuration")
}
