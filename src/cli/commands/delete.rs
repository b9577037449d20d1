//! `cookiedeck delete` — remove one cookie, or every cookie for the
//! domain with `--all`.  Batch removals report partial failures in
//! aggregate instead of aborting.

use crate::cli::{open_session, output, require_domain, Cli};
use crate::errors::{CookieDeckError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: Option<&str>, path: Option<&str>, all: bool, force: bool) -> Result<()> {
    let domain = require_domain(cli)?;

    if all {
        return delete_all(cli, domain, force);
    }

    let name = name.ok_or_else(|| {
        CookieDeckError::CommandFailed("specify a cookie name, or --all for the whole domain".into())
    })?;

    if !force && !confirm(&format!("Delete cookie '{name}' for {domain}?"))? {
        return Err(CookieDeckError::UserCancelled);
    }

    let (mut session, _, data_dir) = open_session(cli)?;
    session.delete(domain, name, path)?;

    crate::audit::log_audit(&data_dir, "delete", domain, Some(name), None);
    output::success(&format!("Deleted cookie '{name}' for {domain}"));
    output::tip("Run `cookiedeck undo` to bring it back.");
    Ok(())
}

fn delete_all(cli: &Cli, domain: &str, force: bool) -> Result<()> {
    if !force && !confirm(&format!("Delete ALL cookies for {domain}?"))? {
        return Err(CookieDeckError::UserCancelled);
    }

    let (mut session, _, data_dir) = open_session(cli)?;
    let outcome = session.delete_all(domain)?;

    crate::audit::log_audit(
        &data_dir,
        "delete-all",
        domain,
        None,
        Some(&format!("{} deleted, {} failed", outcome.applied, outcome.failed)),
    );

    if outcome.failed > 0 {
        output::warning(&format!(
            "Deleted {} cookies, {} failed",
            outcome.applied, outcome.failed
        ));
    } else {
        output::success(&format!("Deleted {} cookies for {domain}", outcome.applied));
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CookieDeckError::CommandFailed(format!("confirmation prompt: {e}")))
}
