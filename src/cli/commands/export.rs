//! `cookiedeck export` — export cookies in various formats.
//!
//! Supported formats: `json` (default), `netscape`, `header`.

use std::fs;
use std::path::Path;

use crate::cli::{copy_to_clipboard, open_session, output, require_domain, Cli};
use crate::errors::{CookieDeckError, Result};
use crate::io::Format;

/// Execute the `export` command.
pub fn execute(cli: &Cli, format: &str, output_path: Option<&str>, copy: bool) -> Result<()> {
    let domain = require_domain(cli)?;
    let format = Format::from_flag(format)?;

    let (session, _, data_dir) = open_session(cli)?;
    let cookies = session.list(Some(domain))?;

    if cookies.is_empty() {
        output::warning(&format!("No cookies to export for {domain}."));
        return Ok(());
    }

    let content = format.format(&cookies)?;

    crate::audit::log_audit(
        &data_dir,
        "export",
        domain,
        None,
        Some(&format!("{} cookies", cookies.len())),
    );

    if copy {
        copy_to_clipboard(&content)?;
        output::success(&format!("Copied {} cookies to the clipboard", cookies.len()));
        return Ok(());
    }

    match output_path {
        Some(dest) => {
            let dest_path = Path::new(dest);

            // Safety: refuse to overwrite the jar or store files.
            if dest_path
                .file_name()
                .is_some_and(|n| n == "cookies.json" || n == "store.json")
            {
                return Err(CookieDeckError::CommandFailed(
                    "refusing to export over a CookieDeck data file".into(),
                ));
            }

            fs::write(dest_path, &content).map_err(|e| {
                CookieDeckError::CommandFailed(format!("failed to write export file: {e}"))
            })?;

            output::success(&format!("Exported {} cookies to {dest}", cookies.len()));
        }
        None => {
            // Write to stdout (no success message, just raw output).
            print!("{content}");
        }
    }

    Ok(())
}
