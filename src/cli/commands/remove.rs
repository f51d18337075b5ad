use crate::cli::{context, output};
use crate::core::errors::Result;
use crate::core::models::profile::{Context, ProfileKey};
use crate::core::services::organizer::Removal;

/// Execute the `vpnport remove <context> <id>` command.
pub fn execute(context_name: &str, id: &str) -> Result<()> {
    context::load_config()?;
    let key = ProfileKey::new(context_name.parse::<Context>()?, id);

    let removal = context::organizer().remove(&key)?;
    output::success(&format!("Removed {key}"));
    if removal == Removal::Disconnected {
        output::warning("VPN disconnected");
    }
    Ok(())
}
