//! `cookiedeck redo` — re-apply the most recently undone mutation.

use crate::cli::{open_session, output, Cli};
use crate::errors::Result;

/// Execute the `redo` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (mut session, _, data_dir) = open_session(cli)?;

    match session.redo()? {
        Some((kind, outcome)) => {
            crate::audit::log_audit(
                &data_dir,
                "redo",
                "-",
                None,
                Some(&format!("{}: {} applied, {} failed", kind.label(), outcome.applied, outcome.failed)),
            );

            if outcome.failed > 0 {
                output::warning(&format!(
                    "Redid {} ({} cookies applied, {} failed)",
                    kind.label(),
                    outcome.applied,
                    outcome.failed
                ));
            } else {
                output::success(&format!("Redid {}", kind.label()));
            }
        }
        None => output::info("Nothing to redo."),
    }

    Ok(())
}
