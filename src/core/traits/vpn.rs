use crate::core::errors::Result;
use crate::core::models::profile::ProfileKey;
use crate::core::models::vpn_status::VpnStatus;

/// Port for the system VPN service.
pub trait VpnControl {
    fn status(&self) -> Result<VpnStatus>;

    /// True when `key` is the active profile.
    fn is_active(&self, key: &ProfileKey) -> Result<bool> {
        Ok(self.status()?.active.as_ref() == Some(key))
    }

    /// Make `key` the active profile and bring the tunnel up.
    fn activate(&self, key: &ProfileKey) -> Result<()>;

    /// Clear the active profile if it is `key`.
    fn forget(&self, key: &ProfileKey) -> Result<()>;

    fn disconnect(&self) -> Result<()>;

    /// Remove the system VPN configuration entirely.
    fn uninstall(&self) -> Result<()>;
}
