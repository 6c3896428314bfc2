//! The `courtside codes` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let (_, service) = super::connect(config_path.as_deref())?;
    let codes = service.list_active_temporary_codes().await?;

    if codes.is_empty() {
        println!("No active temporary codes.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Code", "Form", "Issued", "Expires"]);

    for code in &codes {
        table.add_row(vec![
            Cell::new(&code.temp_code),
            Cell::new(format!(
                "{} ({})",
                code.parent_form_title, code.parent_form_code
            )),
            Cell::new(code.issued_at.format("%Y-%m-%d %H:%M")),
            Cell::new(code.expires_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    println!("{table}");
    Ok(())
}
