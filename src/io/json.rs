//! JSON cookie interchange — an array of records, the same shape the
//! jar file uses.

use crate::cookie::CookieRecord;
use crate::errors::{CookieDeckError, Result};

/// Parse a JSON array of cookie records.
pub fn parse(content: &str) -> Result<Vec<CookieRecord>> {
    let records: Vec<CookieRecord> = serde_json::from_str(content)
        .map_err(|e| CookieDeckError::CommandFailed(format!("invalid cookie JSON: {e}")))?;

    Ok(records.into_iter().map(CookieRecord::normalized).collect())
}

/// Render records as pretty-printed JSON.
pub fn format(records: &[CookieRecord]) -> Result<String> {
    serde_json::to_string_pretty(records)
        .map_err(|e| CookieDeckError::SerializationError(format!("JSON export: {e}")))
}
