//! Output formatters for batch summaries

use anyhow::Result;
use colored::*;
use covercraft_core::{BatchSummary, FailureKind, Outcome};
use std::path::Path;

/// Print one line per file with a distinct symbol per outcome, then a bold
/// summary block.
pub fn print_human(root: &Path, summary: &BatchSummary) {
    println!("{}", format!("Processing: {}", root.display()).bold());
    println!();

    if summary.reports.is_empty() {
        println!("{}", "No spreadsheet files found.".yellow());
        return;
    }

    for report in &summary.reports {
        match &report.outcome {
            Outcome::Moved {
                sheet,
                already_leftmost,
            } => {
                let note = if *already_leftmost {
                    " (already leftmost)"
                } else {
                    ""
                };
                println!(
                    "{} {} '{}'{}",
                    "↔".cyan().bold(),
                    report.path.display(),
                    sheet.cyan(),
                    note
                );
            }
            Outcome::Inserted { replaced_existing } => {
                let note = if *replaced_existing {
                    " (replaced existing)"
                } else {
                    ""
                };
                println!("{} {}{}", "+".green().bold(), report.path.display(), note);
            }
            Outcome::Failed { kind, message } => {
                let label = match kind {
                    FailureKind::Open => "open failed",
                    FailureKind::Save => "save failed",
                };
                println!(
                    "{} {} [{}] {}",
                    "✗".red().bold(),
                    report.path.display(),
                    label.bright_black(),
                    message
                );
            }
        }
    }

    println!();
    println!("{}", "Summary:".bold().underline());
    println!("  {} {}", "Moved:".cyan().bold(), summary.moved());
    println!("  {} {}", "Inserted:".green().bold(), summary.inserted());
    if summary.failed() > 0 {
        println!("  {} {}", "Failed:".red().bold(), summary.failed());
    }
}

/// Print the summary in JSON format
pub fn print_json(summary: &BatchSummary) -> Result<()> {
    let output = serde_json::json!({
        "reports": &summary.reports,
        "summary": {
            "total": summary.reports.len(),
            "moved": summary.moved(),
            "inserted": summary.inserted(),
            "failed": summary.failed(),
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
