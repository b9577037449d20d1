//! Netscape `cookies.txt` interchange.
//!
//! Seven tab-separated columns per line:
//!
//! ```text
//! domain  include_subdomains  path  secure  expiry  name  value
//! ```
//!
//! `include_subdomains` is TRUE for domain cookies (leading-dot) and
//! FALSE for host-only ones.  `expiry` is Unix seconds, 0 for session
//! cookies.  The `#HttpOnly_` domain prefix convention marks HttpOnly
//! cookies; other `#` lines are comments.

use crate::cookie::{CookieRecord, SameSite};
use crate::errors::{CookieDeckError, Result};

/// Marker prefix for HttpOnly cookies.
const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// Parse `cookies.txt` content.
///
/// Malformed lines fail the whole parse with a line number, so a user
/// notices a broken export instead of silently losing cookies.
pub fn parse(content: &str) -> Result<Vec<CookieRecord>> {
    let mut records = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim_end();
        if line.is_empty() {
            continue;
        }

        // HttpOnly lines start with '#' but are data, not comments.
        let (line, http_only) = match line.strip_prefix(HTTP_ONLY_PREFIX) {
            Some(rest) => (rest, true),
            None if line.starts_with('#') => continue,
            None => (line, false),
        };

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 7 {
            return Err(CookieDeckError::CommandFailed(format!(
                "line {}: expected 7 tab-separated fields, got {}",
                index + 1,
                fields.len()
            )));
        }

        let domain = fields[0];
        let include_subdomains = fields[1].eq_ignore_ascii_case("TRUE");
        let path = fields[2];
        let secure = fields[3].eq_ignore_ascii_case("TRUE");
        let expiry: i64 = fields[4].parse().map_err(|_| {
            CookieDeckError::CommandFailed(format!(
                "line {}: bad expiry timestamp '{}'",
                index + 1,
                fields[4]
            ))
        })?;

        let expiration_date = if expiry == 0 { None } else { Some(expiry) };

        records.push(CookieRecord::new(
            fields[5],
            fields[6],
            domain,
            path,
            secure,
            http_only,
            SameSite::Unspecified,
            !include_subdomains,
            expiration_date,
        ));
    }

    Ok(records)
}

/// Render records as `cookies.txt` content.
pub fn format(records: &[CookieRecord]) -> String {
    use std::fmt::Write;

    let mut out = String::from("# Netscape HTTP Cookie File\n");
    for record in records {
        let prefix = if record.http_only { HTTP_ONLY_PREFIX } else { "" };
        let include_subdomains = if record.host_only { "FALSE" } else { "TRUE" };
        let secure = if record.secure { "TRUE" } else { "FALSE" };
        let expiry = record.expiration_date.unwrap_or(0);

        let _ = writeln!(
            out,
            "{prefix}{}\t{include_subdomains}\t{}\t{secure}\t{expiry}\t{}\t{}",
            record.domain, record.path, record.name, record.value
        );
    }
    out
}
