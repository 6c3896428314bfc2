//! The `courtside revoke-code` command.

use std::path::PathBuf;

use anyhow::Result;

use courtside_core::codes::TEMP_CODE_PREFIX;

pub async fn execute(code: String, config_path: Option<PathBuf>) -> Result<()> {
    anyhow::ensure!(
        code.starts_with(TEMP_CODE_PREFIX),
        "{code} is not a temporary code; only {TEMP_CODE_PREFIX} codes can be revoked"
    );

    let (_, service) = super::connect(config_path.as_deref())?;
    service.delete_temporary_code(&code).await?;

    println!("Revoked {code}");
    Ok(())
}
