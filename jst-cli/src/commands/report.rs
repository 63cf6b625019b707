//! Per-target summary printing shared by `jst build` and `jst compile`.

use anyhow::{Context, Result};
use colored::Colorize;

use jst_build::{TargetReport, WriteOutcome};

/// Print one line per target plus its destination and missing sources.
pub fn print_reports(reports: &[TargetReport], dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    for report in reports {
        let (mark, verb) = match &report.outcome {
            WriteOutcome::Written { .. } => ("✓".green(), "written"),
            WriteOutcome::WouldWrite { .. } => ("~".yellow(), "would write"),
            WriteOutcome::Unchanged { .. } => ("·".bright_black(), "unchanged"),
            WriteOutcome::Empty { .. } => ("!".yellow(), "empty, not written"),
        };
        println!(
            "{prefix}{mark} '{}' {verb} ({} template{})",
            report.name,
            report.templates,
            if report.templates == 1 { "" } else { "s" }
        );
        println!("    {}", report.outcome.path().display());
        for path in &report.missing {
            println!("    {} {} not found", "missing".yellow(), path.display());
        }
    }
}

pub fn print_json(reports: &[TargetReport]) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(reports).context("failed to serialize build report")?
    );
    Ok(())
}
