use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::models::configuration::Configuration;

/// Category of a parse failure or warning.
///
/// Drives both the message shown to the user and whether the source
/// file gets removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedOption,
    MissingOption,
    UnsupportedOption,
    EncryptionSecretRequired,
    DecryptionFailed,
    Other,
}

impl ErrorKind {
    /// Kinds that name a single offending option and may be raised as warnings.
    pub fn is_option_kind(self) -> bool {
        matches!(
            self,
            Self::MalformedOption | Self::MissingOption | Self::UnsupportedOption
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MalformedOption => "malformed option",
            Self::MissingOption => "missing option",
            Self::UnsupportedOption => "unsupported option",
            Self::EncryptionSecretRequired => "encryption passphrase required",
            Self::DecryptionFailed => "decryption failed",
            Self::Other => "parsing failed",
        };
        f.write_str(name)
    }
}

/// One user-initiated import attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub location: PathBuf,
    pub secret: Option<String>,
}

impl ImportRequest {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            secret: None,
        }
    }

    /// Same location, different passphrase.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// File name without extension, used as prompt title and default profile name.
    pub fn display_name(&self) -> String {
        normalized_filename(&self.location)
    }
}

impl fmt::Debug for ImportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportRequest")
            .field("location", &self.location)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// `profile.ovpn` -> `profile`.
pub fn normalized_filename(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// What the parser produced for a request. Produced exactly once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Success(Configuration),
    /// The file is encrypted and the passphrase is absent or wrong.
    NeedsSecret { kind: ErrorKind },
    /// The file parsed, but something in it may not work.
    RecoverableWarning {
        config: Configuration,
        kind: ErrorKind,
        detail: String,
    },
    FatalError { kind: ErrorKind, detail: String },
}

/// How an import interaction ended, after any prompts were answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportResult {
    Imported(Configuration),
    /// Passphrase entry dismissed. Source file kept.
    Cancelled,
    /// Warning declined. Source file kept.
    Declined,
    /// Fatal error shown and dismissed. Source file removed.
    Failed { kind: ErrorKind, message: String },
}
