use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::VpnportError;
use crate::core::models::configuration::Configuration;

/// Whether a profile comes from a known provider or an imported host file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    Provider,
    Host,
}

impl Context {
    /// Directory name used by the profile store.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Provider => "providers",
            Self::Host => "hosts",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider => write!(f, "provider"),
            Self::Host => write!(f, "host"),
        }
    }
}

impl FromStr for Context {
    type Err = VpnportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "provider" | "providers" => Ok(Self::Provider),
            "host" | "hosts" => Ok(Self::Host),
            other => Err(VpnportError::InvalidConfig {
                detail: format!("Unknown profile context '{other}'. Use 'host' or 'provider'."),
            }),
        }
    }
}

/// Identifies a profile across both contexts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProfileKey {
    pub context: Context,
    pub id: String,
}

impl ProfileKey {
    pub fn new(context: Context, id: impl Into<String>) -> Self {
        Self {
            context,
            id: id.into(),
        }
    }

    pub fn host(id: impl Into<String>) -> Self {
        Self::new(Context::Host, id)
    }

    pub fn provider(id: impl Into<String>) -> Self {
        Self::new(Context::Provider, id)
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.context, self.id)
    }
}

/// Context-specific payload of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProfileBody {
    Provider {
        infrastructure: String,
    },
    Host {
        configuration: Configuration,
        /// SHA-256 of the imported file, hex encoded.
        source_sha256: String,
    },
}

/// A saved profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    pub key: ProfileKey,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub body: ProfileBody,
}
