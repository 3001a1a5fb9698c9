use anyhow::{Context, Result, bail};
use fallrisk_core::{ColumnOrder, FieldType};
use fallrisk_parser::parse_schema_file;
use fallrisk_validator::SchemaValidator;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(schema_path: &Path) -> Result<()> {
    info!("Checking schema: {}", schema_path.display());

    let schema = parse_schema_file(schema_path)
        .with_context(|| format!("Failed to parse schema file: {}", schema_path.display()))?;

    output::print_info(&format!(
        "Schema loaded: {} fields, {} rows",
        schema.fields.len(),
        schema.rows
    ));

    println!("\nSchema Summary:");
    println!("  Rows:        {}", schema.rows);
    println!("  Fields:      {}", schema.fields.len());
    for field_type in FieldType::ALL {
        let count = schema.fields_of_type(field_type).count();
        if count > 0 {
            println!("    {:<12} {}", field_type.as_str(), count);
        }
    }

    let documented: Vec<&str> = schema
        .percentile_thresholds
        .keys()
        .map(String::as_str)
        .collect();
    if documented.is_empty() {
        println!("  Percentiles: none");
    } else {
        println!("  Percentiles: {}", documented.join(", "));
    }

    let problems = SchemaValidator::new(ColumnOrder::default()).validate_schema_definition(&schema);
    if !problems.is_empty() {
        println!();
        for problem in &problems {
            output::print_error(&problem.to_string());
        }
        bail!("Schema definition has {} problem(s)", problems.len());
    }

    output::print_success("Schema definition is valid");
    Ok(())
}
