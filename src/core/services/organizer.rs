use sha2::{Digest, Sha256};
use tracing::info;

use crate::core::errors::{Result, VpnportError};
use crate::core::models::configuration::Configuration;
use crate::core::models::profile::{ConnectionProfile, Context, ProfileBody, ProfileKey};
use crate::core::models::prompt::PromptResponse;
use crate::core::services::messages::Strings;
use crate::core::traits::presenter::Presenter;
use crate::core::traits::profile_store::ProfileStore;
use crate::core::traits::vpn::VpnControl;

/// Provider infrastructures a provider profile can be created for.
pub const KNOWN_PROVIDERS: &[&str] = &[
    "Mullvad",
    "NordVPN",
    "PIA",
    "ProtonVPN",
    "TunnelBear",
    "VyprVPN",
    "Windscribe",
];

/// What removing a profile did to the VPN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The tunnel was brought down: the profile was active, or it was the last one.
    Disconnected,
    Kept,
}

/// Bookkeeping over saved profiles, keeping the VPN consistent with them.
pub struct Organizer<S: ProfileStore, V: VpnControl> {
    pub store: S,
    pub vpn: V,
}

impl<S: ProfileStore, V: VpnControl> Organizer<S, V> {
    /// Profile ids in display order.
    ///
    /// Providers sort by name, hosts sort ignoring case.
    pub fn ids(&self, context: Context) -> Result<Vec<String>> {
        let mut ids = self.store.ids(context)?;
        match context {
            Context::Provider => ids.sort(),
            Context::Host => ids.sort_by_key(|id| id.to_lowercase()),
        }
        Ok(ids)
    }

    /// Known providers that have no profile yet.
    pub fn available_providers(&self) -> Result<Vec<&'static str>> {
        let created = self.store.ids(Context::Provider)?;
        Ok(KNOWN_PROVIDERS
            .iter()
            .copied()
            .filter(|name| !created.iter().any(|id| id == name))
            .collect())
    }

    pub fn add_provider(&self, name: &str) -> Result<ConnectionProfile> {
        let available = self.available_providers()?;
        if available.is_empty() {
            return Err(VpnportError::ExhaustedProviders);
        }

        let Some(canonical) = KNOWN_PROVIDERS
            .iter()
            .find(|known| known.eq_ignore_ascii_case(name))
        else {
            return Err(VpnportError::UnknownProvider {
                name: name.to_string(),
                available: available.join(", "),
            });
        };

        let key = ProfileKey::provider(*canonical);
        if self.store.contains(&key) {
            return Err(VpnportError::ProfileExists {
                context: key.context.to_string(),
                id: key.id,
            });
        }

        let profile = ConnectionProfile {
            key,
            created_at: chrono::Utc::now(),
            body: ProfileBody::Provider {
                infrastructure: canonical.to_string(),
            },
        };
        self.store.save(&profile)?;
        info!(profile = %profile.key, "added provider profile");
        Ok(profile)
    }

    /// Save an imported configuration as a host profile.
    pub fn add_host(
        &self,
        id: &str,
        configuration: Configuration,
        source: &[u8],
    ) -> Result<ConnectionProfile> {
        let key = ProfileKey::host(id);
        if self.store.contains(&key) {
            return Err(VpnportError::ProfileExists {
                context: key.context.to_string(),
                id: key.id,
            });
        }

        let profile = ConnectionProfile {
            key,
            created_at: chrono::Utc::now(),
            body: ProfileBody::Host {
                configuration,
                source_sha256: hex_digest(source),
            },
        };
        self.store.save(&profile)?;
        info!(profile = %profile.key, "added host profile");
        Ok(profile)
    }

    pub fn activate(&self, key: &ProfileKey) -> Result<()> {
        if !self.store.contains(key) {
            return Err(not_found(key));
        }
        self.vpn.activate(key)
    }

    /// Remove a profile.
    ///
    /// Disconnects when the removed profile was active or when no profile
    /// is left afterwards.
    pub fn remove(&self, key: &ProfileKey) -> Result<Removal> {
        if !self.store.contains(key) {
            return Err(not_found(key));
        }

        let was_active = self.vpn.is_active(key)?;
        self.store.remove(key)?;
        self.vpn.forget(key)?;

        let remaining =
            self.store.ids(Context::Provider)?.len() + self.store.ids(Context::Host)?.len();

        if remaining == 0 || was_active {
            self.vpn.disconnect()?;
            info!(profile = %key, remaining, "removed profile and disconnected");
            return Ok(Removal::Disconnected);
        }

        info!(profile = %key, remaining, "removed profile");
        Ok(Removal::Kept)
    }

    /// Ask for confirmation, then erase the system VPN configuration.
    ///
    /// Returns whether the user confirmed.
    pub fn confirm_uninstall<U: Presenter>(
        &self,
        presenter: &mut U,
        strings: &Strings,
    ) -> Result<bool> {
        match presenter.present(&strings.uninstall_prompt()) {
            PromptResponse::Confirmed => {
                self.vpn.uninstall()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

fn not_found(key: &ProfileKey) -> VpnportError {
    VpnportError::ProfileNotFound {
        context: key.context.to_string(),
        id: key.id.clone(),
    }
}

fn hex_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
