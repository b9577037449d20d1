//! `cookiedeck import` — import cookies from external files.
//!
//! Supported formats:
//! - JSON (array of cookie records)
//! - Netscape `cookies.txt`
//! - `Cookie:` header strings (needs `--domain` for defaults)

use std::fs;
use std::path::Path;

use crate::cli::{open_session, output, require_domain, Cli};
use crate::errors::{CookieDeckError, Result};
use crate::io::Format;

/// Execute the `import` command.
pub fn execute(cli: &Cli, file_path: &str, format: Option<&str>) -> Result<()> {
    let domain = require_domain(cli)?;
    let source = Path::new(file_path);

    if !source.exists() {
        return Err(CookieDeckError::CommandFailed(format!(
            "import file not found: {}",
            source.display()
        )));
    }

    let format = match format {
        Some(flag) => Format::from_flag(flag)?,
        None => Format::detect(source),
    };

    let content = fs::read_to_string(source)
        .map_err(|e| CookieDeckError::CommandFailed(format!("failed to read file: {e}")))?;
    let records = format.parse(&content, domain)?;

    if records.is_empty() {
        output::warning("No cookies found in the import file.");
        return Ok(());
    }

    let (mut session, _, data_dir) = open_session(cli)?;
    let outcome = session.import(&records, domain)?;

    crate::audit::log_audit(
        &data_dir,
        "import",
        domain,
        None,
        Some(&format!("{} cookies from {}", outcome.applied, source.display())),
    );

    if outcome.failed > 0 {
        output::warning(&format!(
            "Imported {} cookies, {} failed",
            outcome.applied, outcome.failed
        ));
    } else {
        output::success(&format!(
            "Imported {} cookies from {}",
            outcome.applied,
            source.display()
        ));
    }

    Ok(())
}
