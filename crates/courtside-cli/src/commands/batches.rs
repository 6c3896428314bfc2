//! The `courtside batches` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table};

use courtside_core::report::BatchReport;
use courtside_report::{write_json, write_markdown};

pub async fn execute(
    from: Option<String>,
    save: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let from_date = from
        .map(|s| {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .with_context(|| format!("invalid --from date '{s}', expected YYYY-MM-DD"))
        })
        .transpose()?;

    let (config, service) = super::connect(config_path.as_deref())?;

    let mut batches = service.batches(from_date).await?;
    batches.sort_by(|a, b| b.date.cmp(&a.date).then(a.form_code.cmp(&b.form_code)));

    if batches.is_empty() {
        println!("No submissions in range.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Form", "Submissions", "Average", "Passed"]);

    for batch in &batches {
        let form = match &batch.form_title {
            Some(title) => format!("{} ({})", title, batch.form_code),
            None => batch.form_code.clone(),
        };
        table.add_row(vec![
            Cell::new(batch.date),
            Cell::new(form),
            Cell::new(batch.submission_count),
            Cell::new(format!("{:.1}%", batch.average_score)),
            Cell::new(format!("{}/{}", batch.pass_count, batch.submission_count)),
        ]);
    }

    println!("{table}");

    if !save {
        return Ok(());
    }

    let report = BatchReport::from_batches(batches, from_date);
    std::fs::create_dir_all(&config.report_dir)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["markdown", "json"]
    } else {
        format.split(',').collect()
    };

    for fmt in &formats {
        match *fmt {
            "markdown" => {
                let path = config.report_dir.join(format!("batches-{timestamp}.md"));
                write_markdown(&report, &path)?;
                println!("Markdown report: {}", path.display());
            }
            "json" => {
                let path = config.report_dir.join(format!("batches-{timestamp}.json"));
                write_json(&report, &path)?;
                println!("JSON report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}
