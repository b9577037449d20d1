//! `cookiedeck profile save` — snapshot the domain's live cookies.

use crate::cli::{open_session, output, require_domain, Cli};
use crate::errors::Result;

/// Execute the `profile save` command.
pub fn execute(cli: &Cli, name: &str, force: bool) -> Result<()> {
    let domain = require_domain(cli)?;
    let (mut session, _, data_dir) = open_session(cli)?;

    let count = session.save_profile(domain, name, force)?;

    crate::audit::log_audit(
        &data_dir,
        "profile-save",
        domain,
        None,
        Some(&format!("'{name}' with {count} cookies")),
    );

    output::success(&format!("Saved profile '{name}' with {count} cookies for {domain}"));
    Ok(())
}
