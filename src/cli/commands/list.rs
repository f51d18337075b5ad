use colored::Colorize;

use crate::cli::{context, output};
use crate::core::errors::Result;
use crate::core::models::profile::{Context, ProfileBody, ProfileKey};
use crate::core::traits::profile_store::ProfileStore;
use crate::core::traits::vpn::VpnControl;

/// Execute the `vpnport list` command.
pub fn execute() -> Result<()> {
    context::load_config()?;
    let organizer = context::organizer();
    let active = organizer.vpn.status()?.active;

    for (context, title) in [(Context::Provider, "Providers"), (Context::Host, "Hosts")] {
        output::header(title);
        let ids = organizer.ids(context)?;
        if ids.is_empty() {
            println!("  (none)");
            continue;
        }

        for id in ids {
            let key = ProfileKey::new(context, id);
            let marker = if active.as_ref() == Some(&key) {
                "●".green().to_string()
            } else {
                " ".to_string()
            };
            let summary = match organizer.store.load(&key)?.body {
                ProfileBody::Provider { infrastructure } => infrastructure,
                ProfileBody::Host { configuration, .. } => configuration
                    .primary_endpoint()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            };
            println!("  {marker} {:<24} {}", key.id, summary.dimmed());
        }
    }
    Ok(())
}
