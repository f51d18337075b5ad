use crate::cli::{context, output};
use crate::core::errors::Result;
use crate::core::traits::vpn::VpnControl;

/// Execute the `vpnport status` command.
pub fn execute() -> Result<()> {
    context::load_config()?;
    let status = context::organizer().vpn.status()?;

    output::header("VPN status");
    let state = match (status.installed, status.connected) {
        (false, _) => "not installed",
        (true, true) => "connected",
        (true, false) => "disconnected",
    };
    println!("  State:   {state}");
    match status.active {
        Some(key) => println!("  Profile: {key}"),
        None => println!("  Profile: (none)"),
    }
    output::detail(&format!("Data directory: {}", context::data_dir().display()));
    Ok(())
}
