//! The `courtside forms` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let (_, service) = super::connect(config_path.as_deref())?;
    let forms = service.forms().await?;

    if forms.is_empty() {
        println!("No forms stored. Publish one with `courtside publish`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Code",
        "Title",
        "Questions",
        "Pass %",
        "Limit",
        "Status",
    ]);

    for form in &forms {
        let status = if form.is_draft {
            "draft"
        } else if form.active {
            "active"
        } else {
            "disabled"
        };
        table.add_row(vec![
            Cell::new(form.code.as_deref().unwrap_or("-")),
            Cell::new(&form.title),
            Cell::new(form.questions.len()),
            Cell::new(form.passing_score_percent),
            Cell::new(format!("{} min", form.time_limit_minutes)),
            Cell::new(status),
        ]);
    }

    println!("{table}");
    Ok(())
}
