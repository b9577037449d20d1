//! `cookiedeck profile load` — replace the domain's cookies with a
//! saved profile.  Per-cookie failures are reported in aggregate.

use crate::cli::{open_session, output, require_domain, Cli};
use crate::errors::Result;

/// Execute the `profile load` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let domain = require_domain(cli)?;
    let (mut session, _, data_dir) = open_session(cli)?;

    let outcome = session.load_profile(domain, name)?;

    crate::audit::log_audit(
        &data_dir,
        "profile-load",
        domain,
        None,
        Some(&format!("'{name}': {} applied, {} failed", outcome.applied, outcome.failed)),
    );

    if outcome.failed > 0 {
        output::warning(&format!(
            "Loaded profile '{name}': {} cookies applied, {} failed",
            outcome.applied, outcome.failed
        ));
    } else {
        output::success(&format!(
            "Loaded profile '{name}' ({} cookies) for {domain}",
            outcome.applied
        ));
    }
    output::tip("Run `cookiedeck undo` to restore the previous cookies.");
    Ok(())
}
