//! `Cookie:` header-string interchange.
//!
//! A request header only carries `name=value` pairs, so importing from
//! one is lossy: records default to the target domain, path `/`,
//! host-only, session expiry.

use crate::cookie::{CookieRecord, SameSite};
use crate::errors::{CookieDeckError, Result};

/// Parse a header string (`a=1; b=2`), with or without the leading
/// `Cookie:` prefix, into records for `domain`.
pub fn parse(content: &str, domain: &str) -> Result<Vec<CookieRecord>> {
    if domain.is_empty() {
        return Err(CookieDeckError::CommandFailed(
            "header import needs a target domain".into(),
        ));
    }

    let content = content.trim();
    let content = content
        .strip_prefix("Cookie:")
        .or_else(|| content.strip_prefix("cookie:"))
        .unwrap_or(content);

    let mut records = Vec::new();
    for pair in content.split(';') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }

        let (name, value) = pair.split_once('=').ok_or_else(|| {
            CookieDeckError::CommandFailed(format!("'{pair}' is not a name=value pair"))
        })?;

        records.push(CookieRecord::new(
            name.trim(),
            value.trim(),
            domain,
            "/",
            false,
            false,
            SameSite::Unspecified,
            true,
            None,
        ));
    }

    Ok(records)
}

/// Render records as a single header value (`a=1; b=2`).
pub fn format(records: &[CookieRecord]) -> String {
    records
        .iter()
        .map(|c| format!("{}={}", c.name, c.value))
        .collect::<Vec<_>>()
        .join("; ")
}
