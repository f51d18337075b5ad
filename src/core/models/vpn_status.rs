use serde::{Deserialize, Serialize};

use crate::core::models::profile::ProfileKey;

/// Snapshot of the VPN service as seen by the organizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnStatus {
    /// A system VPN configuration is installed.
    pub installed: bool,
    pub connected: bool,
    pub active: Option<ProfileKey>,
}
