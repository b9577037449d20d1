//! `cookiedeck share` — build a shareable link for the domain's live
//! cookies or its saved profiles, optionally password-encrypted.

use chrono::Utc;

use crate::cli::{
    copy_to_clipboard, open_session, output, prompt_new_share_password, require_domain, Cli,
};
use crate::errors::{CookieDeckError, Result};
use crate::share::transport::to_shareable_url_with_base;
use crate::share::{seal_payload, ShareItem, SharePayload};

/// Execute the `share` command.
pub fn execute(cli: &Cli, profiles: bool, encrypt: bool, ttl_hours: Option<i64>, copy: bool) -> Result<()> {
    let domain = require_domain(cli)?;
    let (session, settings, data_dir) = open_session(cli)?;

    let now = Utc::now().timestamp();
    let expires_at = match ttl_hours {
        Some(hours) if hours > 0 => now + hours * 3_600,
        Some(_) => {
            return Err(CookieDeckError::CommandFailed(
                "--ttl-hours must be positive".into(),
            ));
        }
        None => 0,
    };

    let payload = if profiles {
        let map = session.profiles_for_domain(domain);
        if map.is_empty() {
            return Err(CookieDeckError::CommandFailed(format!(
                "no saved profiles for {domain}"
            )));
        }
        SharePayload::profiles(map, domain, expires_at, now)
    } else {
        let cookies = session.list(Some(domain))?;
        if cookies.is_empty() {
            return Err(CookieDeckError::CommandFailed(format!(
                "no cookies to share for {domain}"
            )));
        }
        SharePayload::cookies(cookies, domain, expires_at, now)
    };

    let count = payload.cookie_count();

    let item = if encrypt {
        let password = prompt_new_share_password()?;
        let envelope = seal_payload(&payload, &password, &settings.kdf_params())?;
        ShareItem::Encrypted(envelope)
    } else {
        ShareItem::Plain(payload)
    };

    let url = to_shareable_url_with_base(&item, &settings.share_base_url)?;

    crate::audit::log_audit(
        &data_dir,
        "share",
        domain,
        None,
        Some(&format!(
            "{count} cookies, {}, {}",
            if encrypt { "encrypted" } else { "plaintext" },
            if expires_at == 0 { "no expiry".to_string() } else { format!("expires {expires_at}") },
        )),
    );

    if copy {
        copy_to_clipboard(&url)?;
        output::success(&format!("Share link for {count} cookies copied to the clipboard"));
    } else {
        output::success(&format!("Share link for {count} cookies:"));
        println!("{url}");
    }

    if !encrypt {
        output::tip("Anyone with this link can read the cookies — use --encrypt for a password.");
    }
    if expires_at != 0 {
        output::tip(&format!("Link expires in {} hours.", ttl_hours.unwrap_or(0)));
    }

    Ok(())
}
