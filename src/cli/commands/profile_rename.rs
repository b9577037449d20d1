//! `cookiedeck profile rename` — rename a profile, keeping its
//! cookies and migrating the loaded marker.

use crate::cli::{open_session, output, require_domain, Cli};
use crate::errors::Result;

/// Execute the `profile rename` command.
pub fn execute(cli: &Cli, from: &str, to: &str) -> Result<()> {
    let domain = require_domain(cli)?;
    let (mut session, _, data_dir) = open_session(cli)?;

    session.rename_profile(domain, from, to)?;

    crate::audit::log_audit(
        &data_dir,
        "profile-rename",
        domain,
        None,
        Some(&format!("'{from}' -> '{to}'")),
    );

    output::success(&format!("Renamed profile '{from}' to '{to}'"));
    Ok(())
}
