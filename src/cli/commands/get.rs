//! `cookiedeck get` — show a single cookie.

use crate::cli::{copy_to_clipboard, open_session, output, require_domain, Cli};
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, name: &str, copy: bool) -> Result<()> {
    let domain = require_domain(cli)?;
    let (session, _, _) = open_session(cli)?;

    let cookie = session.get(domain, name)?;

    if copy {
        copy_to_clipboard(&cookie.value)?;
        output::success(&format!("Copied value of '{name}' to the clipboard"));
        return Ok(());
    }

    output::print_cookies_table(std::slice::from_ref(&cookie));
    Ok(())
}
