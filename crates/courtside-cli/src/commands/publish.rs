//! The `courtside publish` command.

use std::path::PathBuf;

use anyhow::Result;

use courtside_core::parser;

pub async fn execute(form_path: PathBuf, dry_run: bool, config_path: Option<PathBuf>) -> Result<()> {
    let form = parser::parse_form_file(&form_path)?;

    let issues = form.publish_issues();
    if !issues.is_empty() {
        for issue in &issues {
            println!("ERROR: {issue}");
        }
        anyhow::bail!("{} is not publishable", form_path.display());
    }

    for w in parser::lint_form(&form) {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("[{id}] "))
            .unwrap_or_default();
        println!("{prefix}WARNING: {}", w.message);
    }

    if dry_run {
        println!(
            "Dry run: '{}' ({} questions) is publishable.",
            form.title,
            form.questions.len()
        );
        return Ok(());
    }

    let (_, service) = super::connect(config_path.as_deref())?;
    let published = service.publish(form).await?;

    println!(
        "Published '{}' with code {}",
        published.title,
        published.code.as_deref().unwrap_or("?")
    );
    println!(
        "  {} questions, pass at {}%, {} minute limit",
        published.questions.len(),
        published.passing_score_percent,
        published.time_limit_minutes
    );

    Ok(())
}
