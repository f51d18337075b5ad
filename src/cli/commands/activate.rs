use crate::cli::{context, output};
use crate::core::errors::Result;
use crate::core::models::profile::{Context, ProfileKey};

/// Execute the `vpnport activate <context> <id>` command.
pub fn execute(context_name: &str, id: &str) -> Result<()> {
    context::load_config()?;
    let key = ProfileKey::new(context_name.parse::<Context>()?, id);

    context::organizer().activate(&key)?;
    output::success(&format!("Activated {key}"));
    Ok(())
}
