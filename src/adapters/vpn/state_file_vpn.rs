use std::path::PathBuf;

use tracing::debug;

use crate::adapters::files::atomic::write_atomically;
use crate::core::errors::{Result, VpnportError};
use crate::core::models::profile::ProfileKey;
use crate::core::models::vpn_status::VpnStatus;
use crate::core::traits::vpn::VpnControl;

/// VPN control backed by a JSON state file.
///
/// Stands in for the platform VPN service: it records what the service
/// would be told (installed, connected, active profile) so the organizer
/// rules can be exercised without a tunnel.
pub struct StateFileVpn {
    path: PathBuf,
}

impl StateFileVpn {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn write(&self, status: &VpnStatus) -> Result<()> {
        let json = serde_json::to_string_pretty(status).map_err(|e| VpnportError::StateError {
            path: self.path.clone(),
            detail: e.to_string(),
        })?;
        write_atomically(&self.path, json.as_bytes())
    }

    fn update(&self, change: impl FnOnce(&mut VpnStatus)) -> Result<()> {
        let mut status = self.status()?;
        change(&mut status);
        self.write(&status)
    }
}

impl VpnControl for StateFileVpn {
    fn status(&self) -> Result<VpnStatus> {
        if !self.path.exists() {
            return Ok(VpnStatus::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| VpnportError::StateError {
            path: self.path.clone(),
            detail: e.to_string(),
        })
    }

    fn activate(&self, key: &ProfileKey) -> Result<()> {
        debug!(profile = %key, "activating profile");
        self.update(|status| {
            status.installed = true;
            status.connected = true;
            status.active = Some(key.clone());
        })
    }

    fn forget(&self, key: &ProfileKey) -> Result<()> {
        self.update(|status| {
            if status.active.as_ref() == Some(key) {
                status.active = None;
            }
        })
    }

    fn disconnect(&self) -> Result<()> {
        debug!("disconnecting");
        self.update(|status| status.connected = false)
    }

    fn uninstall(&self) -> Result<()> {
        debug!("uninstalling VPN configuration");
        self.update(|status| {
            status.installed = false;
            status.connected = false;
        })
    }
}
