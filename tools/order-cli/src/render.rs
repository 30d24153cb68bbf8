//! Plain-text rendering for command output.

use declarative_order::{ApplyReport, OrderResult};
use std::fmt::Write;

/// Two-column table of items and priorities, in priority order.
pub fn order_table(result: &OrderResult) -> String {
    let width = result
        .entries
        .iter()
        .map(|e| e.item.as_str().len())
        .max()
        .unwrap_or(0)
        .max("ITEM".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  PRIORITY", "ITEM");
    for entry in &result.entries {
        let _ = writeln!(out, "{:<width$}  {}", entry.item.as_str(), entry.priority);
    }
    out
}

/// One-paragraph summary of an apply run.
pub fn apply_summary(report: &ApplyReport, dry_run: bool) -> String {
    let mut out = String::new();
    let verb = if dry_run { "would update" } else { "updated" };

    let _ = writeln!(
        out,
        "{} {} item(s), {} already up to date",
        verb,
        report.applied.len(),
        report.unchanged.len()
    );
    for item in &report.applied {
        let _ = writeln!(out, "  {} {}", if dry_run { "~" } else { "*" }, item);
    }
    for warning in &report.warnings {
        let _ = writeln!(out, "warning: {}", warning);
    }
    out
}
