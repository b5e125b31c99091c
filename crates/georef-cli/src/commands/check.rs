//! Check command - run QC over an occurrence file.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use georef::BatchReport;

use crate::cli::{DataOptions, OutputFormat};

pub fn run(
    file: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
    data: &DataOptions,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let qc = super::build_qc(data)?;
    let report = qc.run_file(&file)?;

    match (format, output) {
        (OutputFormat::Json, Some(path)) => {
            fs::write(&path, serde_json::to_string_pretty(&report)?)?;
            print_summary(&report);
            println!();
            println!(
                "{} {}",
                "Saved to".green().bold(),
                path.display().to_string().white()
            );
        }
        (OutputFormat::Json, None) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        (OutputFormat::Text, output) => {
            println!(
                "{} {}",
                "Checked".cyan().bold(),
                file.display().to_string().white()
            );
            println!();
            for record in report.records.iter().filter(|r| verbose || r.has_issues()) {
                super::print_record(record, verbose);
                println!();
            }
            print_summary(&report);

            if let Some(path) = output {
                fs::write(&path, serde_json::to_string_pretty(&report)?)?;
                println!(
                    "{} {}",
                    "Saved to".green().bold(),
                    path.display().to_string().white()
                );
            }
        }
    }

    Ok(())
}

fn print_summary(report: &BatchReport) {
    let summary = &report.summary;
    println!(
        "{} records, {} with issues, {} proposed changes",
        summary.total_records.to_string().white().bold(),
        summary.records_with_issues.to_string().yellow(),
        summary.proposed_changes.to_string().cyan()
    );

    if summary.records_with_issues == 0 {
        println!("{}", "No georeference issues found.".green());
    }
}
