pub mod commands;
pub mod context;
pub mod output;
pub mod presenter;

use clap::{Parser, Subcommand};

use crate::core::models::configuration::UnknownDirectivePolicy;

/// Import, organize and activate OpenVPN-style profiles.
#[derive(Parser, Debug)]
#[command(name = "vpnport", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding config, staged files and profiles
    #[arg(long, global = true, env = "VPNPORT_DIR", default_value = ".vpnport")]
    pub dir: String,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the data directory with default configuration
    Init,

    /// Import a profile file as a host profile
    Import {
        /// Profile file (.ovpn), plain or passphrase-encrypted
        file: String,
        /// Profile name (default: file name without extension)
        #[arg(long)]
        name: Option<String>,
        /// Passphrase for encrypted profiles (prompted for when missing or wrong)
        #[arg(long, env = "VPNPORT_PASSPHRASE", hide_env_values = true)]
        passphrase: Option<String>,
        /// Override the configured handling of unknown directives: error, warn or ignore
        #[arg(long)]
        unknown_directives: Option<UnknownDirectivePolicy>,
    },

    /// List staged profile files waiting in the import inbox
    Imported,

    /// List providers and hosts
    List,

    /// Add a provider profile (without a name, list available providers)
    AddProvider {
        /// Provider name, e.g. Mullvad
        name: Option<String>,
    },

    /// Make a profile the active one
    Activate {
        /// host or provider
        context: String,
        /// Profile id
        id: String,
    },

    /// Remove a profile
    Remove {
        /// host or provider
        context: String,
        /// Profile id
        id: String,
    },

    /// Show VPN status and the active profile
    Status,

    /// Erase the VPN configuration from the system
    Uninstall {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Encrypt a profile file with a passphrase for sharing
    Seal {
        /// Profile file to encrypt
        file: String,
        /// Output path (default: <file>.age)
        #[arg(long)]
        output: Option<String>,
        /// Passphrase (prompted for when missing)
        #[arg(long, env = "VPNPORT_PASSPHRASE", hide_env_values = true)]
        passphrase: Option<String>,
    },
}
