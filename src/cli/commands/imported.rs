use crate::cli::{context, output};
use crate::core::errors::Result;

/// Extensions recognized as profile files in the inbox.
const PROFILE_EXTENSIONS: &[&str] = &["ovpn", "conf"];

/// Execute the `vpnport imported` command.
///
/// Lists profile files staged in the inbox, e.g. ones whose import was
/// cancelled or declined and can be retried.
pub fn execute() -> Result<()> {
    context::load_config()?;
    let inbox = context::inbox_dir();

    let mut names = Vec::new();
    if inbox.exists() {
        for entry in std::fs::read_dir(&inbox)? {
            let path = entry?.path();
            let is_profile = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| PROFILE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            if is_profile {
                if let Some(name) = path.file_name() {
                    names.push(name.to_string_lossy().into_owned());
                }
            }
        }
    }
    names.sort_by_key(|n| n.to_lowercase());

    output::header("Imported files");
    if names.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for name in &names {
        println!("  {name}");
    }
    output::detail(&format!("Inbox: {}", inbox.display()));
    Ok(())
}
