//! `cookiedeck profile status` — which profile is loaded, and has the
//! live cookie set drifted from it.

use console::style;

use crate::cli::{open_session, require_domain, Cli};
use crate::errors::Result;

/// Execute the `profile status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let domain = require_domain(cli)?;
    let (mut session, _, _) = open_session(cli)?;

    let status = session.profile_status(domain)?;

    println!("{} {}", style("Domain:").bold(), style(domain).cyan());
    println!(
        "{} {}",
        style("Profiles:").bold(),
        status.profile_count
    );

    match status.last_loaded {
        Some(name) => {
            let state = if status.modified {
                style("modified").yellow().bold().to_string()
            } else {
                style("unchanged").green().to_string()
            };
            println!("{} {name} ({state})", style("Loaded:").bold());
        }
        None => {
            println!("{} {}", style("Loaded:").bold(), style("none").dim());
        }
    }

    Ok(())
}
