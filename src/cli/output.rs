//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use chrono::{TimeZone, Utc};
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::cookie::CookieRecord;
use crate::history::HistoryEntry;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Render a cookie's flag summary, e.g. "Secure HttpOnly lax".
fn flags(cookie: &CookieRecord) -> String {
    let mut parts = Vec::new();
    if cookie.secure {
        parts.push("Secure".to_string());
    }
    if cookie.http_only {
        parts.push("HttpOnly".to_string());
    }
    if cookie.host_only {
        parts.push("HostOnly".to_string());
    }
    parts.push(cookie.same_site.label().to_string());
    parts.join(" ")
}

/// Render an expiration timestamp for display.
fn expiry(cookie: &CookieRecord) -> String {
    match cookie.expiration_date {
        Some(ts) => Utc
            .timestamp_opt(ts, 0)
            .single()
            .map_or_else(|| ts.to_string(), |dt| dt.format("%Y-%m-%d %H:%M").to_string()),
        None => "session".to_string(),
    }
}

/// Print a table of cookies (Name, Value, Domain, Path, Flags, Expires).
pub fn print_cookies_table(cookies: &[CookieRecord]) {
    if cookies.is_empty() {
        info("No cookies found.");
        tip("Run `cookiedeck set <NAME> <VALUE> --domain <DOMAIN>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Value", "Domain", "Path", "Flags", "Expires"]);

    for cookie in cookies {
        table.add_row(vec![
            cookie.name.clone(),
            truncate(&cookie.value, 40),
            cookie.domain.clone(),
            cookie.path.clone(),
            flags(cookie),
            expiry(cookie),
        ]);
    }

    println!("{table}");
}

/// Print the undo history, oldest first.
pub fn print_history_table(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        info("History is empty.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Operation", "Domain", "Cookies", "When"]);

    for (index, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            entry.kind.label().to_string(),
            entry.domain.clone(),
            entry.cookies.len().to_string(),
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{head}\u{2026}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        let out = truncate("abcdefghij", 5);
        assert_eq!(out.chars().count(), 5);
        assert!(out.ends_with('\u{2026}'));
    }
}
