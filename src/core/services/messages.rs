use serde::{Deserialize, Serialize};

use crate::core::models::import::ErrorKind;
use crate::core::models::prompt::{Prompt, PromptStyle};

/// Languages user-facing prompts are available in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    It,
}

/// Localized prompt texts.
///
/// Every method is a pure function of the locale and its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Strings {
    locale: Locale,
}

impl Strings {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn ok(&self) -> &'static str {
        "OK"
    }

    pub fn cancel(&self) -> &'static str {
        match self.locale {
            Locale::En => "Cancel",
            Locale::It => "Annulla",
        }
    }

    /// Message asking for the passphrase of an encrypted profile.
    pub fn secret_message(&self, kind: ErrorKind) -> String {
        let retry = kind == ErrorKind::DecryptionFailed;
        match (self.locale, retry) {
            (Locale::En, false) => "Please enter the encryption passphrase.".into(),
            (Locale::En, true) => {
                "Unable to decrypt the configuration file. Please enter the encryption passphrase again."
                    .into()
            }
            (Locale::It, false) => "Inserisci la passphrase di cifratura.".into(),
            (Locale::It, true) => {
                "Impossibile decifrare il file di configurazione. Inserisci di nuovo la passphrase di cifratura."
                    .into()
            }
        }
    }

    /// Message for a file that parsed but carries a questionable option.
    pub fn warning_message(&self, detail: &str) -> String {
        match self.locale {
            Locale::En => format!(
                "The configuration file is correct but contains a potentially unsupported option ({detail}).\n\n\
                 Connectivity may break depending on server settings. Import anyway?"
            ),
            Locale::It => format!(
                "Il file di configurazione è corretto ma contiene un'opzione potenzialmente non supportata ({detail}).\n\n\
                 La connessione potrebbe non funzionare a seconda delle impostazioni del server. Importare comunque?"
            ),
        }
    }

    /// Message for a file that cannot be imported.
    ///
    /// Kinds without a dedicated text fall back to the generic parsing
    /// message, which carries `detail` verbatim.
    pub fn error_message(&self, kind: ErrorKind, detail: &str) -> String {
        match (self.locale, kind) {
            (Locale::En, ErrorKind::MalformedOption) => {
                format!("The configuration file contains a malformed option ({detail}).")
            }
            (Locale::En, ErrorKind::MissingOption) => {
                format!("The configuration file lacks a required option ({detail}).")
            }
            (Locale::En, ErrorKind::UnsupportedOption) => {
                format!("The configuration file contains an unsupported option ({detail}).")
            }
            (Locale::En, ErrorKind::DecryptionFailed) => {
                format!("Unable to decrypt the configuration file ({detail}).")
            }
            (Locale::En, _) => {
                format!("Unable to parse the provided configuration file ({detail}).")
            }
            (Locale::It, ErrorKind::MalformedOption) => {
                format!("Il file di configurazione contiene un'opzione non valida ({detail}).")
            }
            (Locale::It, ErrorKind::MissingOption) => {
                format!("Al file di configurazione manca un'opzione obbligatoria ({detail}).")
            }
            (Locale::It, ErrorKind::UnsupportedOption) => {
                format!("Il file di configurazione contiene un'opzione non supportata ({detail}).")
            }
            (Locale::It, ErrorKind::DecryptionFailed) => {
                format!("Impossibile decifrare il file di configurazione ({detail}).")
            }
            (Locale::It, _) => {
                format!("Impossibile leggere il file di configurazione fornito ({detail}).")
            }
        }
    }

    pub fn secret_prompt(&self, title: &str, kind: ErrorKind) -> Prompt {
        Prompt {
            title: title.to_string(),
            message: self.secret_message(kind),
            style: PromptStyle::SecureText,
            actions: vec![self.ok().into(), self.cancel().into()],
        }
    }

    pub fn warning_prompt(&self, title: &str, detail: &str) -> Prompt {
        Prompt {
            title: title.to_string(),
            message: self.warning_message(detail),
            style: PromptStyle::ConfirmCancel,
            actions: vec![self.ok().into(), self.cancel().into()],
        }
    }

    pub fn error_prompt(&self, title: &str, message: &str) -> Prompt {
        Prompt {
            title: title.to_string(),
            message: message.to_string(),
            style: PromptStyle::DismissOnly,
            actions: vec![self.ok().into()],
        }
    }

    /// Prompt for the passphrase a profile is sealed with.
    pub fn seal_prompt(&self, title: &str) -> Prompt {
        let message = match self.locale {
            Locale::En => "Choose an encryption passphrase.",
            Locale::It => "Scegli una passphrase di cifratura.",
        };
        Prompt {
            title: title.to_string(),
            message: message.into(),
            style: PromptStyle::SecureText,
            actions: vec![self.ok().into(), self.cancel().into()],
        }
    }

    pub fn uninstall_prompt(&self) -> Prompt {
        let (title, message) = match self.locale {
            Locale::En => (
                "Uninstall VPN",
                "Do you really want to erase the VPN configuration from your system? \
                 Your profiles are kept.",
            ),
            Locale::It => (
                "Disinstalla VPN",
                "Vuoi davvero cancellare la configurazione VPN dal sistema? \
                 I tuoi profili verranno mantenuti.",
            ),
        };
        Prompt {
            title: title.into(),
            message: message.into(),
            style: PromptStyle::ConfirmCancel,
            actions: vec![self.ok().into(), self.cancel().into()],
        }
    }
}
