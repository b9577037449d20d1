//! `cookiedeck audit` — display the audit log.
//!
//! Usage:
//!   cookiedeck audit               # show last 50 entries
//!   cookiedeck audit --last 20     # show last 20
//!   cookiedeck audit --since 7d    # entries from last 7 days

use chrono::Utc;

use crate::audit::{AuditEntry, AuditLog};
use crate::cli::{load_settings, output, Cli};
use crate::errors::{CookieDeckError, Result};

/// Execute the `audit` command.
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    let (cwd, settings) = load_settings(cli)?;
    let data_dir = settings.data_dir_path(&cwd);

    let audit = AuditLog::open(&data_dir)
        .ok_or_else(|| CookieDeckError::AuditError("failed to open audit database".into()))?;

    let since_dt = match since {
        Some(s) => Some(parse_duration(s)?),
        None => None,
    };

    let entries = audit.query(last, since_dt)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    print_audit_table(&entries);

    Ok(())
}

/// Parse a human-friendly duration string like "7d", "24h", "30m".
fn parse_duration(input: &str) -> Result<chrono::DateTime<Utc>> {
    let input = input.trim();

    let (num_str, unit) = if let Some(s) = input.strip_suffix('d') {
        (s, 'd')
    } else if let Some(s) = input.strip_suffix('h') {
        (s, 'h')
    } else if let Some(s) = input.strip_suffix('m') {
        (s, 'm')
    } else {
        return Err(CookieDeckError::CommandFailed(format!(
            "invalid duration '{input}' — use format like 7d, 24h, or 30m"
        )));
    };

    let num: i64 = num_str.parse().map_err(|_| {
        CookieDeckError::CommandFailed(format!(
            "invalid duration '{input}' — number part is not valid"
        ))
    })?;

    let duration = match unit {
        'd' => chrono::Duration::days(num),
        'h' => chrono::Duration::hours(num),
        'm' => chrono::Duration::minutes(num),
        _ => unreachable!(),
    };

    Ok(Utc::now() - duration)
}

/// Print audit entries in a formatted table.
fn print_audit_table(entries: &[AuditEntry]) {
    use comfy_table::{ContentArrangement, Table};

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Domain", "Cookie", "Details"]);

    for entry in entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            entry.operation.clone(),
            entry.domain.clone(),
            entry.cookie_name.clone().unwrap_or_default(),
            entry.details.clone().unwrap_or_default(),
        ]);
    }

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_days() {
        let cutoff = parse_duration("7d").unwrap();
        let expected = Utc::now() - chrono::Duration::days(7);
        assert!((cutoff - expected).num_seconds().abs() < 5);
    }

    #[test]
    fn parse_duration_hours_and_minutes() {
        assert!(parse_duration("24h").is_ok());
        assert!(parse_duration("30m").is_ok());
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert!(parse_duration("7w").is_err());
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("d").is_err());
    }
}
