use std::path::Path;

use tracing::{debug, info, warn};

use crate::core::models::import::{ImportRequest, ImportResult, ParseOutcome};
use crate::core::models::prompt::PromptResponse;
use crate::core::services::messages::Strings;
use crate::core::traits::parser::ConfigurationParser;
use crate::core::traits::presenter::Presenter;
use crate::core::traits::source_files::SourceFiles;

/// Maps an import request onto a `ParseOutcome` by delegating to a parser.
///
/// No prompts, no side effects.
pub struct ImportResolver<P: ConfigurationParser> {
    pub parser: P,
}

impl<P: ConfigurationParser> ImportResolver<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    pub fn resolve(&self, request: &ImportRequest) -> ParseOutcome {
        debug!(location = %request.location.display(), "resolving import request");
        self.parser
            .parse(&request.location, request.secret.as_deref())
    }
}

/// Drives an import to completion, asking the user whenever the outcome
/// needs an answer.
///
/// - `Success` is returned as is.
/// - `NeedsSecret` asks for a passphrase and resolves again; dismissing
///   the prompt cancels. The file is kept either way.
/// - `RecoverableWarning` asks whether to proceed; declining keeps the file.
///   Only option kinds can be waived this way, anything else is fatal.
/// - `FatalError` shows the error and, once dismissed, removes the file.
pub struct ImportFlow<P: ConfigurationParser, U: Presenter, F: SourceFiles> {
    pub resolver: ImportResolver<P>,
    pub presenter: U,
    pub files: F,
    pub strings: Strings,
}

impl<P, U, F> ImportFlow<P, U, F>
where
    P: ConfigurationParser,
    U: Presenter,
    F: SourceFiles,
{
    pub fn run(&mut self, request: ImportRequest) -> ImportResult {
        let title = request.display_name();
        let mut request = request;

        loop {
            match self.resolver.resolve(&request) {
                ParseOutcome::Success(config) => return ImportResult::Imported(config),

                ParseOutcome::NeedsSecret { kind } => {
                    let prompt = self.strings.secret_prompt(&title, kind);
                    match self.presenter.present(&prompt) {
                        PromptResponse::Submitted(secret) => {
                            request = request.with_secret(secret);
                        }
                        _ => {
                            info!(location = %request.location.display(), "passphrase entry cancelled");
                            return ImportResult::Cancelled;
                        }
                    }
                }

                ParseOutcome::RecoverableWarning {
                    config,
                    kind,
                    detail,
                } if kind.is_option_kind() => {
                    info!(%kind, %detail, "configuration parsed with warning");
                    let prompt = self.strings.warning_prompt(&title, &detail);
                    return match self.presenter.present(&prompt) {
                        PromptResponse::Confirmed => ImportResult::Imported(config),
                        _ => ImportResult::Declined,
                    };
                }

                ParseOutcome::FatalError { kind, detail }
                | ParseOutcome::RecoverableWarning { kind, detail, .. } => {
                    info!(%kind, %detail, "could not parse configuration");
                    let message = self.strings.error_message(kind, &detail);
                    let prompt = self.strings.error_prompt(&title, &message);
                    self.presenter.present(&prompt);
                    self.discard(&request.location);
                    return ImportResult::Failed { kind, message };
                }
            }
        }
    }

    /// Best-effort removal of a file that failed to import.
    fn discard(&self, location: &Path) {
        if let Err(e) = self.files.remove(location) {
            warn!(location = %location.display(), error = %e, "could not remove rejected profile file");
        }
    }
}
