//! `cookiedeck open` — accept a share link and import its contents.
//!
//! The expiry check runs after decoding (and decryption, for sealed
//! envelopes) but before anything touches the cookie store: an expired
//! share is refused even though it decodes fine.

use chrono::Utc;

use crate::cli::{open_session, output, prompt_share_password, Cli};
use crate::errors::{CookieDeckError, Result};
use crate::share::{from_shareable_url, open_payload, ShareItem, ShareKind, SharePayload};

/// Execute the `open` command.
pub fn execute(cli: &Cli, url: &str, force: bool) -> Result<()> {
    let item = from_shareable_url(url).ok_or_else(|| {
        CookieDeckError::MalformedPayload("this URL does not contain shared cookie data".into())
    })?;

    let payload = match item {
        ShareItem::Plain(payload) => payload,
        ShareItem::Encrypted(envelope) => {
            let password = prompt_share_password()?;
            open_payload(&envelope, &password)?
        }
    };

    if payload.is_expired(Utc::now().timestamp()) {
        return Err(CookieDeckError::ExpiredShare);
    }

    let domain = payload.domain.clone();
    let (mut session, _, data_dir) = open_session(cli)?;

    match payload.kind {
        ShareKind::Cookies => import_cookies(&mut session, &data_dir, &domain, &payload),
        ShareKind::Profiles => import_profiles(&mut session, &data_dir, &domain, payload, force),
    }
}

fn import_cookies(
    session: &mut crate::cli::CliSession,
    data_dir: &std::path::Path,
    domain: &str,
    payload: &SharePayload,
) -> Result<()> {
    let cookies = payload.cookies.as_deref().unwrap_or_default();
    if cookies.is_empty() {
        output::warning("The share contained no cookies.");
        return Ok(());
    }

    let outcome = session.import(cookies, domain)?;

    crate::audit::log_audit(
        data_dir,
        "open-share",
        domain,
        None,
        Some(&format!("{} cookies imported", outcome.applied)),
    );

    if outcome.failed > 0 {
        output::warning(&format!(
            "Imported {} cookies for {domain}, {} failed",
            outcome.applied, outcome.failed
        ));
    } else {
        output::success(&format!(
            "Imported {} cookies for {domain}",
            outcome.applied
        ));
    }
    output::tip("Run `cookiedeck undo` to reverse the import.");
    Ok(())
}

fn import_profiles(
    session: &mut crate::cli::CliSession,
    data_dir: &std::path::Path,
    domain: &str,
    payload: SharePayload,
    force: bool,
) -> Result<()> {
    let profiles = payload.profiles.unwrap_or_default();
    if profiles.is_empty() {
        output::warning("The share contained no profiles.");
        return Ok(());
    }

    let total = profiles.len();
    let imported = session.import_profiles(domain, profiles, force)?;
    let skipped = total - imported;

    crate::audit::log_audit(
        data_dir,
        "open-share",
        domain,
        None,
        Some(&format!("{imported} profiles imported, {skipped} skipped")),
    );

    if skipped > 0 {
        output::warning(&format!(
            "Imported {imported} profiles for {domain}, skipped {skipped} existing (use --force to overwrite)"
        ));
    } else {
        output::success(&format!("Imported {imported} profiles for {domain}"));
    }
    Ok(())
}
