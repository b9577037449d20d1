//! `cookiedeck profile delete` — remove a saved profile.

use crate::cli::{open_session, output, require_domain, Cli};
use crate::errors::{CookieDeckError, Result};

/// Execute the `profile delete` command.
pub fn execute(cli: &Cli, name: &str, force: bool) -> Result<()> {
    let domain = require_domain(cli)?;

    if !force {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete profile '{name}' for {domain}?"))
            .default(false)
            .interact()
            .map_err(|e| CookieDeckError::CommandFailed(format!("confirmation prompt: {e}")))?;
        if !confirmed {
            return Err(CookieDeckError::UserCancelled);
        }
    }

    let (mut session, _, data_dir) = open_session(cli)?;
    session.delete_profile(domain, name)?;

    crate::audit::log_audit(&data_dir, "profile-delete", domain, None, Some(name));

    output::success(&format!("Deleted profile '{name}' for {domain}"));
    Ok(())
}
