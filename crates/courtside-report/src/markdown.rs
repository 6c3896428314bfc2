//! Markdown summary generator.
//!
//! Produces the operator summary pasted into weekly association reports.

use std::path::Path;

use anyhow::Result;

use courtside_core::batch::Batch;
use courtside_core::report::BatchReport;

/// Render a batch report as markdown, newest batches first.
pub fn generate_markdown(report: &BatchReport) -> String {
    let mut md = String::new();

    md.push_str("# Assessment batch report\n\n");
    md.push_str(&format!(
        "Generated {} | {} batches | {} submissions | average score {:.1}\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        report.batches.len(),
        report.total_submissions,
        report.overall_average_score,
    ));
    if let Some(from) = report.from_date {
        md.push_str(&format!("Filtered from {from} inclusive.\n\n"));
    }

    if report.batches.is_empty() {
        md.push_str("No submissions in range.\n");
        return md;
    }

    let mut batches: Vec<&Batch> = report.batches.iter().collect();
    batches.sort_by(|a, b| b.date.cmp(&a.date).then(a.form_code.cmp(&b.form_code)));

    md.push_str("| Date | Form | Submissions | Average | Passed | Pass rate |\n");
    md.push_str("|------|------|-------------|---------|--------|-----------|\n");
    for batch in &batches {
        let title = batch
            .form_title
            .clone()
            .unwrap_or_else(|| batch.form_code.clone());
        let pass_rate = if batch.submission_count == 0 {
            0.0
        } else {
            100.0 * batch.pass_count as f64 / batch.submission_count as f64
        };
        md.push_str(&format!(
            "| {} | {} | {} | {:.1} | {} | {:.0}% |\n",
            batch.date,
            title,
            batch.submission_count,
            batch.average_score,
            batch.pass_count,
            pass_rate,
        ));
    }

    md
}

/// Write the markdown summary to a file.
pub fn write_markdown(report: &BatchReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_markdown(report))?;
    Ok(())
}
