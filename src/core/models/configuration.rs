use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Port used when neither `remote` nor `port` specify one.
pub const DEFAULT_PORT: u16 = 1194;

/// Transport protocol of a remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Udp,
    Tcp,
}

impl Protocol {
    /// Accepts the spellings OpenVPN understands for `proto` and `remote`.
    pub fn from_directive(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "udp" | "udp4" | "udp6" => Some(Self::Udp),
            "tcp" | "tcp4" | "tcp6" | "tcp-client" | "tcp4-client" | "tcp6-client" => {
                Some(Self::Tcp)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Udp => write!(f, "udp"),
            Self::Tcp => write!(f, "tcp"),
        }
    }
}

/// A server the tunnel may connect to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub protocol: Protocol,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.host, self.port, self.protocol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsWrapStrategy {
    Auth,
    Crypt,
}

/// Static key wrapping the TLS control channel (`<tls-auth>` / `<tls-crypt>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsWrap {
    pub strategy: TlsWrapStrategy,
    pub key: String,
    pub direction: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keepalive {
    pub interval_secs: u32,
    pub timeout_secs: u32,
}

/// A fully parsed tunnel configuration.
///
/// This is what a successful import yields and what host profiles persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub remotes: Vec<Endpoint>,
    pub randomize_remotes: bool,
    pub cipher: Option<String>,
    #[serde(default)]
    pub data_ciphers: Vec<String>,
    pub digest: Option<String>,
    pub ca: String,
    pub client_certificate: Option<String>,
    pub client_key: Option<String>,
    pub tls_wrap: Option<TlsWrap>,
    pub compression: Option<String>,
    pub keepalive: Option<Keepalive>,
    pub renegotiation_secs: Option<u32>,
    #[serde(default)]
    pub dns_servers: Vec<String>,
    pub search_domain: Option<String>,
    #[serde(default)]
    pub routes: Vec<String>,
    pub redirect_gateway: bool,
    pub requires_credentials: bool,
}

impl Configuration {
    /// First endpoint, used as the display address of a host profile.
    pub fn primary_endpoint(&self) -> Option<&Endpoint> {
        self.remotes.first()
    }
}

/// What the parser does with directives it does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownDirectivePolicy {
    /// Reject the file as unsupported.
    Error,
    /// Parse the file but ask before importing it.
    #[default]
    Warn,
    /// Skip the directive silently.
    Ignore,
}

impl FromStr for UnknownDirectivePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!(
                "unknown directive policy '{other}', expected error, warn or ignore"
            )),
        }
    }
}
