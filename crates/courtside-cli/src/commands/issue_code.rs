//! The `courtside issue-code` command.

use std::path::PathBuf;

use anyhow::Result;

pub async fn execute(form_code: String, config_path: Option<PathBuf>) -> Result<()> {
    let (_, service) = super::connect(config_path.as_deref())?;

    let forms = service.forms().await?;
    let form = forms
        .iter()
        .find(|f| f.code.as_deref() == Some(form_code.as_str()))
        .ok_or_else(|| anyhow::anyhow!("no form with code {form_code}"))?;

    let temp = service.issue_temporary_code(form).await?;

    println!("Issued {} for '{}'", temp.temp_code, form.title);
    println!("  valid until {}", temp.expires_at.format("%Y-%m-%d %H:%M UTC"));

    Ok(())
}
