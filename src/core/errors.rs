use std::path::PathBuf;

/// All domain errors for vpnport.
///
/// Parse problems inside an imported profile are NOT represented here:
/// those travel as a `ParseOutcome` and end up as an `ImportResult`.
/// These variants cover everything around the import flow.
#[derive(Debug, thiserror::Error)]
pub enum VpnportError {
    #[error(
        "File not found: {path}\n\n  \
         Check that the path is correct and the file exists.\n  \
         Run 'vpnport imported' to see staged profile files."
    )]
    FileNotFound { path: PathBuf },

    #[error(
        "vpnport is not initialized in {dir}\n\n  \
         Run 'vpnport init' first, or point --dir at an existing data directory."
    )]
    NotInitialized { dir: PathBuf },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(
        "Profile '{id}' ({context}) not found\n\n  \
         Run 'vpnport list' to see available profiles."
    )]
    ProfileNotFound { context: String, id: String },

    #[error(
        "Profile '{id}' ({context}) already exists\n\n  \
         Solutions:\n    \
         → Pick another name: vpnport import <file> --name <name>\n    \
         → Remove the old one: vpnport remove {context} '{id}'"
    )]
    ProfileExists { context: String, id: String },

    #[error(
        "Unknown provider '{name}'\n\n  \
         Available providers: {available}"
    )]
    UnknownProvider { name: String, available: String },

    #[error("All known providers have already been added")]
    ExhaustedProviders,

    #[error("Import of {file} failed: {reason}")]
    ImportFailed { file: String, reason: String },

    #[error("Encryption failed: {reason}")]
    EncryptionFailed { reason: String },

    #[error(
        "This data directory uses format version {found}, but this vpnport \
         only supports up to version {supported}.\n\n  \
         Upgrade vpnport, or point --dir at another data directory."
    )]
    FormatVersionTooNew { found: u32, supported: u32 },

    #[error("State file error in {path}: {detail}")]
    StateError { path: PathBuf, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VpnportError>;
