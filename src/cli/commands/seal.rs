use std::path::PathBuf;

use crate::adapters::cipher::age_envelope::AgeEnvelope;
use crate::cli::presenter::TerminalPresenter;
use crate::cli::{context, output};
use crate::core::errors::{Result, VpnportError};
use crate::core::models::prompt::PromptResponse;
use crate::core::services::messages::{Locale, Strings};
use crate::core::traits::presenter::Presenter;

/// Execute the `vpnport seal <file>` command.
///
/// Encrypts a profile with a passphrase. The result imports like any
/// other profile; `vpnport import` asks for the passphrase.
pub fn execute(file: &str, destination: Option<&str>, passphrase: Option<&str>) -> Result<()> {
    let source = PathBuf::from(file);
    if !source.is_file() {
        return Err(VpnportError::FileNotFound { path: source });
    }

    let plaintext = std::fs::read(&source)?;
    if AgeEnvelope::is_sealed(&plaintext) {
        return Err(VpnportError::EncryptionFailed {
            reason: format!("{} is already encrypted", source.display()),
        });
    }

    let passphrase = match passphrase {
        Some(p) => p.to_string(),
        None => ask_passphrase(file)?,
    };

    let dest = destination
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("{file}.age")));

    output::header(&format!("Sealing {file}"));
    let sealed = AgeEnvelope::seal(&plaintext, &passphrase)?;
    std::fs::write(&dest, sealed)?;

    output::success(&format!("Encrypted profile written to {}", dest.display()));
    Ok(())
}

fn ask_passphrase(file: &str) -> Result<String> {
    let locale = match context::load_config() {
        Ok(config) => config.vpnport.locale,
        Err(VpnportError::NotInitialized { .. }) => Locale::default(),
        Err(e) => return Err(e),
    };
    let prompt = Strings::new(locale).seal_prompt(file);

    match TerminalPresenter::new().present(&prompt) {
        PromptResponse::Submitted(secret) if !secret.is_empty() => Ok(secret),
        _ => Err(VpnportError::EncryptionFailed {
            reason: "No passphrase given".into(),
        }),
    }
}
