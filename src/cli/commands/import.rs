use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::adapters::files::fs_source_files::FsSourceFiles;
use crate::adapters::parsers::ovpn_parser::OvpnParser;
use crate::cli::presenter::TerminalPresenter;
use crate::cli::{context, output};
use crate::core::errors::{Result, VpnportError};
use crate::core::models::configuration::UnknownDirectivePolicy;
use crate::core::models::import::{ImportRequest, ImportResult, normalized_filename};
use crate::core::models::profile::ProfileKey;
use crate::core::services::import_resolver::{ImportFlow, ImportResolver};
use crate::core::services::messages::Strings;
use crate::core::traits::profile_store::ProfileStore;

/// Execute the `vpnport import <file>` command.
///
/// Stages the file into the import inbox, resolves it (asking for a
/// passphrase or confirmation when needed) and saves the result as a
/// host profile. A staged file that cannot be parsed is discarded.
pub fn execute(
    file: &str,
    name: Option<&str>,
    passphrase: Option<&str>,
    policy: Option<UnknownDirectivePolicy>,
) -> Result<()> {
    let config = context::load_config()?;

    let source = PathBuf::from(file);
    if !source.is_file() {
        return Err(VpnportError::FileNotFound { path: source });
    }

    let id = name
        .map(str::to_string)
        .unwrap_or_else(|| normalized_filename(&source));
    context::validate_profile_id(&id)?;

    let organizer = context::organizer();
    let key = ProfileKey::host(&id);
    if organizer.store.contains(&key) {
        return Err(VpnportError::ProfileExists {
            context: key.context.to_string(),
            id,
        });
    }

    let staged = stage(&source, &context::inbox_dir())?;

    output::header(&format!("Importing {file}"));
    output::detail(&format!("Staged: {}", staged.display()));

    let mut request = ImportRequest::new(&staged);
    if let Some(secret) = passphrase {
        request = request.with_secret(secret);
    }

    let policy = policy.unwrap_or(config.vpnport.unknown_directives);
    let mut flow = ImportFlow {
        resolver: ImportResolver::new(OvpnParser::new(policy)),
        presenter: TerminalPresenter::new(),
        files: FsSourceFiles,
        strings: Strings::new(config.vpnport.locale),
    };

    match flow.run(request) {
        ImportResult::Imported(configuration) => {
            let source_bytes = std::fs::read(&staged)?;
            let endpoint = configuration.primary_endpoint().map(ToString::to_string);
            let profile = organizer.add_host(&id, configuration, &source_bytes)?;

            output::success(&format!("Imported host profile '{}'", profile.key.id));
            if let Some(endpoint) = endpoint {
                output::detail(&format!("Endpoint: {endpoint}"));
            }
            println!("\n  Run 'vpnport activate host \"{}\"' to use it.", profile.key.id);
            Ok(())
        }
        ImportResult::Cancelled => {
            output::warning("Import cancelled, the staged file was kept");
            Ok(())
        }
        ImportResult::Declined => {
            output::warning("Import declined, the staged file was kept");
            Ok(())
        }
        ImportResult::Failed { kind, .. } => Err(VpnportError::ImportFailed {
            file: file.to_string(),
            reason: format!("{kind}, the staged file was discarded"),
        }),
    }
}

/// Copy `source` into the inbox, unless it already lives there.
///
/// A staged file never replaces a different one: when the name is taken
/// by other content the copy gets a numeric suffix (`office-2.ovpn`).
/// Identical content reuses the existing staged file.
fn stage(source: &Path, inbox: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(inbox)?;
    let inbox = inbox.canonicalize()?;
    let source = source.canonicalize()?;

    if source.parent() == Some(inbox.as_path()) {
        return Ok(source);
    }

    let stem = source
        .file_stem()
        .ok_or_else(|| VpnportError::FileNotFound {
            path: source.clone(),
        })?
        .to_string_lossy()
        .into_owned();
    let extension = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let content = std::fs::read(&source)?;

    let mut attempt = 1u32;
    loop {
        let name = if attempt == 1 {
            format!("{stem}{extension}")
        } else {
            format!("{stem}-{attempt}{extension}")
        };
        let candidate = inbox.join(name);

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(mut file) => {
                file.write_all(&content)?;
                return Ok(candidate);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                if std::fs::read(&candidate)? == content {
                    return Ok(candidate);
                }
                debug!(taken = %candidate.display(), "staged name in use");
            }
            Err(e) => return Err(e.into()),
        }
        attempt += 1;
    }
}
