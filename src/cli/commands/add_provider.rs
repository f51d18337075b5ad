use crate::cli::{context, output};
use crate::core::errors::{Result, VpnportError};

/// Execute the `vpnport add-provider [name]` command.
///
/// Without a name, lists the providers that can still be added.
pub fn execute(name: Option<&str>) -> Result<()> {
    context::load_config()?;
    let organizer = context::organizer();

    let Some(name) = name else {
        let available = organizer.available_providers()?;
        if available.is_empty() {
            return Err(VpnportError::ExhaustedProviders);
        }
        output::header("Available providers");
        for provider in available {
            println!("  {provider}");
        }
        return Ok(());
    };

    let profile = organizer.add_provider(name)?;
    output::success(&format!("Added provider profile '{}'", profile.key.id));
    Ok(())
}
