//! Cycle statistics
//!
//! Condenses a cycle report into counts for logs, the CLI and refresh
//! responses.

use crate::state::SyncOutcome;
use crate::sync::CycleReport;
use serde::Serialize;

/// Counts of per-document outcomes for one cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleSummary {
    /// Documents on the menu this cycle
    pub total: usize,

    pub updated: usize,

    pub unchanged: usize,

    pub failed: usize,

    /// Identifiers of the failed documents, in menu order
    pub failed_documents: Vec<String>,

    /// Cycle wall time in milliseconds
    pub elapsed_ms: u64,
}

impl CycleSummary {
    /// Builds the summary of a completed cycle
    pub fn from_report(report: &CycleReport) -> Self {
        Self {
            total: report.len(),
            updated: report.count(SyncOutcome::Updated),
            unchanged: report.count(SyncOutcome::Unchanged),
            failed: report.count(SyncOutcome::Failed),
            failed_documents: report.failed().into_iter().map(String::from).collect(),
            elapsed_ms: report.elapsed_ms,
        }
    }

    /// Percentage of documents that did not fail
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.total - self.failed) as f64 / self.total as f64 * 100.0
    }
}

/// Prints a cycle report to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The completed cycle to display
pub fn print_cycle_report(report: &CycleReport) {
    let summary = CycleSummary::from_report(report);

    println!("=== Sync Cycle ===\n");
    println!("Started: {}", report.started_at.to_rfc3339());
    println!("Elapsed: {}ms", summary.elapsed_ms);
    println!();

    println!("Documents ({}):", summary.total);
    for (id, outcome) in &report.outcomes {
        println!("  {:<10} {}", outcome.as_str(), id);
    }
    println!();

    println!("Updated:   {}", summary.updated);
    println!("Unchanged: {}", summary.unchanged);
    println!("Failed:    {}", summary.failed);
    println!("Success rate: {:.1}%", summary.success_rate());
}
