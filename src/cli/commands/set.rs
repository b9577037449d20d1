//! `cookiedeck set` — create or update a cookie.
//!
//! When a cookie with the same name/domain/path already exists this is
//! an edit (recorded as such in history); otherwise a create.  The
//! `--rename` flag edits the identity, which sequences a removal of
//! the old cookie so no duplicate is left behind.

use crate::cli::{open_session, output, parse_same_site, require_domain, Cli};
use crate::cookie::CookieRecord;
use crate::errors::{CookieDeckError, Result};

/// Arguments collected from the `set` flags.
pub struct SetArgs<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
    pub path: &'a str,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: &'a str,
    pub subdomains: bool,
    pub expires: Option<i64>,
    pub rename: Option<&'a str>,
}

/// Execute the `set` command.
pub fn execute(cli: &Cli, args: &SetArgs) -> Result<()> {
    let domain = require_domain(cli)?;
    let same_site = parse_same_site(args.same_site)?;

    // Prompt when no value was given on the command line.
    let value = match args.value {
        Some(v) => v.to_string(),
        None => dialoguer::Input::<String>::new()
            .with_prompt(format!("Value for '{}'", args.name))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| CookieDeckError::CommandFailed(format!("value prompt: {e}")))?,
    };

    // Domain cookies carry a leading dot; host-only cookies never do.
    let record_domain = if args.subdomains {
        format!(".{}", domain.trim_start_matches('.'))
    } else {
        domain.to_string()
    };

    let new_name = args.rename.unwrap_or(args.name);
    let record = CookieRecord::new(
        new_name,
        value,
        record_domain,
        args.path,
        args.secure,
        args.http_only,
        same_site,
        !args.subdomains,
        args.expires,
    );

    let (mut session, _, data_dir) = open_session(cli)?;

    let existing = session.get(domain, args.name).ok().filter(|c| c.path == args.path);

    match existing {
        Some(old) => {
            session.edit(&old, &record)?;
            crate::audit::log_audit(&data_dir, "edit", domain, Some(args.name), None);
            if let Some(renamed) = args.rename {
                output::success(&format!("Updated cookie '{}' (renamed to '{renamed}')", args.name));
            } else {
                output::success(&format!("Updated cookie '{}'", args.name));
            }
        }
        None => {
            if args.rename.is_some() {
                return Err(CookieDeckError::CookieNotFound {
                    name: args.name.to_string(),
                    domain: domain.to_string(),
                });
            }
            session.add(&record)?;
            crate::audit::log_audit(&data_dir, "create", domain, Some(args.name), None);
            output::success(&format!("Created cookie '{}' for {domain}", args.name));
        }
    }

    Ok(())
}
