//! One module per subcommand.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use courtside_api::{create_portal, load_config_from, CourtsideConfig};
use courtside_core::service::AssessmentService;

pub mod batches;
pub mod clear_submissions;
pub mod codes;
pub mod forms;
pub mod init;
pub mod issue_code;
pub mod publish;
pub mod revoke_code;
pub mod submissions;
pub mod validate;

/// Load config and build a service talking to the configured portal.
pub(crate) fn connect(config_path: Option<&Path>) -> Result<(CourtsideConfig, AssessmentService)> {
    let config = load_config_from(config_path)?;
    let service = AssessmentService::new(Arc::new(create_portal(&config)));
    Ok((config, service))
}
