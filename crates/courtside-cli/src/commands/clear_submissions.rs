//! The `courtside clear-submissions` command.

use std::path::PathBuf;

use anyhow::Result;

pub async fn execute(yes: bool, config_path: Option<PathBuf>) -> Result<()> {
    if !yes {
        anyhow::bail!("this deletes every recorded submission; re-run with --yes to confirm");
    }

    let (_, service) = super::connect(config_path.as_deref())?;
    let count = service.clear_submissions().await?;

    println!("Deleted {count} submission(s).");
    Ok(())
}
