use crate::cli::presenter::TerminalPresenter;
use crate::cli::{context, output};
use crate::core::errors::Result;
use crate::core::services::messages::Strings;
use crate::core::traits::vpn::VpnControl;

/// Execute the `vpnport uninstall` command.
pub fn execute(yes: bool) -> Result<()> {
    let config = context::load_config()?;
    let organizer = context::organizer();

    if yes {
        organizer.vpn.uninstall()?;
        output::success("VPN configuration erased");
        return Ok(());
    }

    let strings = Strings::new(config.vpnport.locale);
    let mut presenter = TerminalPresenter::new();
    if organizer.confirm_uninstall(&mut presenter, &strings)? {
        output::success("VPN configuration erased");
    } else {
        output::warning("Uninstall cancelled");
    }
    Ok(())
}
