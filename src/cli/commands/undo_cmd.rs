//! `cookiedeck undo` — reverse the most recent cookie mutation.

use crate::cli::{open_session, output, Cli};
use crate::errors::Result;

/// Execute the `undo` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (mut session, _, data_dir) = open_session(cli)?;

    match session.undo()? {
        Some((kind, outcome)) => {
            crate::audit::log_audit(
                &data_dir,
                "undo",
                "-",
                None,
                Some(&format!("{}: {} applied, {} failed", kind.label(), outcome.applied, outcome.failed)),
            );

            if outcome.failed > 0 {
                output::warning(&format!(
                    "Undid {} ({} cookies restored, {} failed)",
                    kind.label(),
                    outcome.applied,
                    outcome.failed
                ));
            } else {
                output::success(&format!("Undid {}", kind.label()));
            }

            let status = session.history_status();
            if status.can_redo {
                output::tip("Run `cookiedeck redo` to re-apply it.");
            }
        }
        None => output::info("Nothing to undo."),
    }

    Ok(())
}
