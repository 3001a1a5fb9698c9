use anyhow::Result;
use colored::*;
use fallrisk_core::ValidationReport;
use serde_json::json;

pub fn print_validation_report(report: &ValidationReport, format: &str) -> Result<()> {
    match format {
        "json" => print_json_report(report)?,
        _ => print_text_report(report),
    }
    Ok(())
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  DATASET VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    println!("\n{}", "Checks:".bold());
    for check in &report.checks {
        if check.passed() {
            println!("  {} {}", "✓".green().bold(), check.kind);
        } else {
            println!("  {} {}", "✗".red().bold(), check.kind.to_string().red());
            for error in &check.errors {
                println!("      - {}", error.red());
            }
        }
    }

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    let failed = report.failed_checks().count();
    println!("\n{}", "Summary:".bold());
    println!("  Checks run:     {}", report.stats.checks_run);
    println!("  Checks failed:  {}", failed);
    println!("  Total errors:   {}", report.errors().len());
    println!("  Rows validated: {}", report.stats.records_validated);
    println!("  Fields checked: {}", report.stats.fields_checked);
    println!("  Duration:       {} ms", report.stats.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) -> Result<()> {
    let output = json!({
        "passed": report.passed,
        "validated_at": chrono::Utc::now().to_rfc3339(),
        "checks": report.checks,
        "errors": report.errors(),
        "stats": report.stats,
        "summary": {
            "check_count": report.checks.len(),
            "failed_count": report.failed_checks().count(),
            "error_count": report.errors().len(),
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
