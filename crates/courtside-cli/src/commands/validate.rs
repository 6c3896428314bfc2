//! The `courtside validate` command.

use std::path::PathBuf;

use anyhow::Result;

use courtside_core::parser;

pub fn execute(form_path: PathBuf) -> Result<()> {
    let forms = if form_path.is_dir() {
        parser::load_form_directory(&form_path)?
    } else {
        vec![parser::parse_form_file(&form_path)?]
    };

    let mut total_issues = 0;

    for form in &forms {
        println!("Form: {} ({} questions)", form.title, form.questions.len());

        let issues = form.publish_issues();
        for issue in &issues {
            println!("  ERROR: {issue}");
        }
        total_issues += issues.len();

        for w in parser::lint_form(form) {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
    }

    if total_issues == 0 {
        println!("All forms publishable.");
    } else {
        println!("\n{total_issues} blocking issue(s) found.");
        anyhow::bail!("validation failed");
    }

    Ok(())
}
