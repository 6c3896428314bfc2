//! Configuration loading for the portal connection.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::client::PortalClient;

/// Top-level courtside configuration.
///
/// Note: the Debug impl masks the API token to prevent accidental exposure
/// in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct CourtsideConfig {
    /// Base URL of the portal backend.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer token for the admin API. Supports `${VAR}` references.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Where `batches --save` writes report snapshots.
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

impl std::fmt::Debug for CourtsideConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourtsideConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("report_dir", &self.report_dir)
            .finish()
    }
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("./courtside-reports")
}

impl Default for CourtsideConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_token: None,
            report_dir: default_report_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `courtside.toml` in the current directory
/// 2. `~/.config/courtside/config.toml`
///
/// Environment variable overrides: `COURTSIDE_API_URL`,
/// `COURTSIDE_API_TOKEN`.
pub fn load_config() -> Result<CourtsideConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<CourtsideConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("courtside.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<CourtsideConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => CourtsideConfig::default(),
    };

    if let Ok(url) = std::env::var("COURTSIDE_API_URL") {
        config.api_url = url;
    }
    if let Ok(token) = std::env::var("COURTSIDE_API_TOKEN") {
        config.api_token = Some(token);
    }

    config.api_url = resolve_env_vars(&config.api_url);
    config.api_token = config.api_token.as_deref().map(resolve_env_vars);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("courtside"))
}

/// Create a portal client from configuration.
pub fn create_portal(config: &CourtsideConfig) -> PortalClient {
    PortalClient::new(&config.api_url, config.api_token.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_COURTSIDE_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_COURTSIDE_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_COURTSIDE_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_COURTSIDE_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = CourtsideConfig::default();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert!(config.api_token.is_none());
    }

    #[test]
    fn parse_config_file() {
        let toml_str = r#"
api_url = "https://portal.example.org"
api_token = "${COURTSIDE_TOKEN}"
report_dir = "/var/reports"
"#;
        let config: CourtsideConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_url, "https://portal.example.org");
        assert_eq!(config.report_dir, PathBuf::from("/var/reports"));
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courtside.toml");
        std::fs::write(&path, "api_url = \"https://portal.example.org\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.api_url, "https://portal.example.org");
    }

    #[test]
    fn missing_explicit_path_errors() {
        assert!(load_config_from(Some(Path::new("no_such_file.toml"))).is_err());
    }

    #[test]
    fn debug_masks_token() {
        let config = CourtsideConfig {
            api_token: Some("secret".into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("***"));
    }
}
