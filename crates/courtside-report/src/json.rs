//! JSON export for spreadsheet-bound tooling.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use courtside_core::report::BatchReport;

/// Flatten a report into one JSON row per submission, the shape the
/// association's spreadsheet import expects.
pub fn submission_rows(report: &BatchReport) -> Vec<serde_json::Value> {
    let mut rows = Vec::new();
    for batch in &report.batches {
        for sub in &batch.submissions {
            rows.push(json!({
                "date": batch.date,
                "formCode": batch.form_code,
                "formTitle": batch.form_title,
                "participantName": sub.participant_name,
                "participantIdentifier": sub.participant_identifier,
                "score": sub.score,
                "passed": sub.passed,
                "timeSpentSeconds": sub.time_spent_seconds,
                "completedAt": sub.completed_at,
            }));
        }
    }
    rows
}

/// Write the full report (snapshot plus flattened rows) as pretty JSON.
pub fn write_json(report: &BatchReport, path: &Path) -> Result<()> {
    let document = json!({
        "report": report,
        "rows": submission_rows(report),
    });
    let content =
        serde_json::to_string_pretty(&document).context("failed to serialize report JSON")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
