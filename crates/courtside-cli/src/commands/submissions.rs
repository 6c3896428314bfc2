//! The `courtside submissions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

pub async fn execute(form_code: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let (_, service) = super::connect(config_path.as_deref())?;
    let mut submissions = service.submissions().await?;

    if let Some(code) = &form_code {
        submissions.retain(|s| s.form_code == *code);
    }

    if submissions.is_empty() {
        println!("No submissions recorded.");
        return Ok(());
    }

    // Newest first.
    submissions.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

    let mut table = Table::new();
    table.set_header(vec![
        "Completed",
        "Form",
        "Participant",
        "Score",
        "Result",
        "Time",
    ]);

    for sub in &submissions {
        table.add_row(vec![
            Cell::new(sub.completed_at.format("%Y-%m-%d %H:%M")),
            Cell::new(&sub.form_code),
            Cell::new(&sub.participant_name),
            Cell::new(format!(
                "{}% ({}/{})",
                sub.score, sub.correct_answers, sub.total_questions
            )),
            Cell::new(if sub.passed { "pass" } else { "fail" }),
            Cell::new(format!("{}s", sub.time_spent_seconds)),
        ]);
    }

    println!("{table}");
    println!("{} submission(s)", submissions.len());
    Ok(())
}
