use serde::Deserialize;
use std::path::Path;

use crate::core::errors::{Result, VpnportError};
use crate::core::models::configuration::UnknownDirectivePolicy;
use crate::core::services::messages::Locale;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Written by `vpnport init`.
pub const DEFAULT_CONFIG: &str = r#"[vpnport]
format_version = 1
# Prompt language: en | it
locale = "en"
# Unknown directives in imported profiles: error | warn | ignore
unknown_directives = "warn"
"#;

/// Top-level configuration read from `<data dir>/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub vpnport: VpnportSection,
}

impl AppConfig {
    /// Load the configuration from `<data_dir>/config.toml`.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Err(VpnportError::NotInitialized {
                dir: data_dir.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(&config_path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| VpnportError::InvalidConfig {
            detail: format!("Failed to parse {CONFIG_FILE}: {e}"),
        })?;

        if config.vpnport.format_version > CURRENT_FORMAT_VERSION {
            return Err(VpnportError::FormatVersionTooNew {
                found: config.vpnport.format_version,
                supported: CURRENT_FORMAT_VERSION,
            });
        }

        Ok(config)
    }
}

/// Newest data directory layout this build understands.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// The `[vpnport]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct VpnportSection {
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub unknown_directives: UnknownDirectivePolicy,
}

fn default_format_version() -> u32 {
    1
}
