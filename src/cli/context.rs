use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::adapters::profile_stores::file_profile_store::FileProfileStore;
use crate::adapters::vpn::state_file_vpn::StateFileVpn;
use crate::config::app_config::AppConfig;
use crate::core::errors::{Result, VpnportError};
use crate::core::services::organizer::Organizer;

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global data directory path.
pub fn init(dir: &str) {
    let _ = DATA_DIR.set(PathBuf::from(dir));
}

/// Get the current data directory path.
pub fn data_dir() -> &'static Path {
    DATA_DIR
        .get()
        .map(|p| p.as_path())
        .unwrap_or(Path::new(".vpnport"))
}

/// Directory where profile files are staged before import.
pub fn inbox_dir() -> PathBuf {
    data_dir().join("imported")
}

pub fn profiles_dir() -> PathBuf {
    data_dir().join("profiles")
}

pub fn vpn_state_path() -> PathBuf {
    data_dir().join("vpn.json")
}

/// Load the configuration, failing when the data directory is not initialized.
pub fn load_config() -> Result<AppConfig> {
    AppConfig::load(data_dir())
}

pub fn organizer() -> Organizer<FileProfileStore, StateFileVpn> {
    Organizer {
        store: FileProfileStore::new(profiles_dir()),
        vpn: StateFileVpn::new(vpn_state_path()),
    }
}

/// Validate a profile id before it becomes part of a file path.
///
/// Letters, digits, spaces, `.`, `_` and `-`, starting with a letter or
/// digit, at most 64 characters.
pub fn validate_profile_id(id: &str) -> Result<()> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ._-]{0,63}$").expect("profile id pattern is valid")
    });

    if pattern.is_match(id) && !id.contains("..") {
        Ok(())
    } else {
        Err(VpnportError::InvalidConfig {
            detail: format!(
                "Invalid profile name '{id}'. Use letters, digits, spaces, '.', '_' or '-' \
                 (max 64 characters). Pass --name to choose another."
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_names() {
        for id in ["office", "Home VPN", "de-fra_01", "client.v2"] {
            assert!(validate_profile_id(id).is_ok(), "{id}");
        }
    }

    #[test]
    fn rejects_path_like_names() {
        for id in ["", "../etc", "a/b", ".hidden", "a..b", &"x".repeat(65)] {
            assert!(validate_profile_id(id).is_err(), "{id}");
        }
    }
}
