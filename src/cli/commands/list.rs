//! `cookiedeck list` — show cookies for a domain (or everything).

use crate::cli::{open_session, output, validate_domain, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    if let Some(domain) = cli.domain.as_deref() {
        validate_domain(domain)?;
    }

    let (session, _, _) = open_session(cli)?;
    let cookies = session.list(cli.domain.as_deref())?;

    output::print_cookies_table(&cookies);

    if let Some(domain) = cli.domain.as_deref() {
        if !cookies.is_empty() {
            output::tip(&format!("{} cookies for {domain}", cookies.len()));
        }
    }

    Ok(())
}
