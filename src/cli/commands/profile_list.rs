//! `cookiedeck profile list` — saved profiles for the domain.

use console::style;

use crate::cli::{open_session, output, require_domain, Cli};
use crate::errors::Result;

/// Execute the `profile list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let domain = require_domain(cli)?;
    let (mut session, _, _) = open_session(cli)?;

    let profiles = session.list_profiles(domain);
    if profiles.is_empty() {
        output::info(&format!("No saved profiles for {domain}."));
        output::tip("Run `cookiedeck profile save <NAME>` to create one.");
        return Ok(());
    }

    let status = session.profile_status(domain)?;

    println!("{} {}", style("Profiles for").bold(), style(domain).cyan());
    for name in &profiles {
        let marker = if status.last_loaded.as_deref() == Some(name.as_str()) {
            if status.modified {
                style(" (loaded, modified)").yellow().to_string()
            } else {
                style(" (loaded)").green().to_string()
            }
        } else {
            String::new()
        };
        println!("  {} {name}{marker}", style("\u{2022}").dim());
    }

    Ok(())
}
