//! `cookiedeck history` — show or clear the undo history.

use crate::cli::{open_session, output, Cli};
use crate::errors::Result;

/// Execute the `history` command.
pub fn execute(cli: &Cli, clear: bool) -> Result<()> {
    let (mut session, _, _) = open_session(cli)?;

    if clear {
        session.clear_history()?;
        output::success("History cleared.");
        return Ok(());
    }

    output::print_history_table(session.history_entries());

    let status = session.history_status();
    if status.can_undo {
        output::tip("Run `cookiedeck undo` to reverse the most recent entry.");
    }

    Ok(())
}
