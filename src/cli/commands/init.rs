use crate::cli::{context, output};
use crate::config::app_config::{CONFIG_FILE, DEFAULT_CONFIG};
use crate::core::errors::{Result, VpnportError};

/// Execute the `vpnport init` command.
///
/// Creates the data directory with a default `config.toml`, the import
/// inbox and the profile store.
pub fn execute() -> Result<()> {
    let dir = context::data_dir();
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() {
        return Err(VpnportError::InvalidConfig {
            detail: format!("vpnport is already initialized ({} exists)", config_path.display()),
        });
    }

    output::header("vpnport — Initializing data directory");

    std::fs::create_dir_all(dir)?;
    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    output::success(&format!("Created {}", dir.display()));
    output::success(&format!("Generated {CONFIG_FILE} with defaults"));

    std::fs::create_dir_all(context::inbox_dir())?;
    std::fs::create_dir_all(context::profiles_dir())?;
    output::success("Created import inbox and profile store");

    println!("\n  Next: vpnport import <profile.ovpn>");
    Ok(())
}
