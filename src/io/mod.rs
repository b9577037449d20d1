//! Import/export format adapters.
//!
//! Every adapter converts between text and a generic
//! `Vec<CookieRecord>`; the session does not care which format a batch
//! came from.
//!
//! Supported formats:
//! - `json`: array of cookie records (the jar's native shape)
//! - `netscape`: the classic 7-column `cookies.txt` layout
//! - `header`: a `Cookie:` request-header string (names + values only)

pub mod header;
pub mod json;
pub mod netscape;

use std::path::Path;

use crate::cookie::CookieRecord;
use crate::errors::{CookieDeckError, Result};

/// A cookie interchange format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Netscape,
    Header,
}

impl Format {
    /// Parse a `--format` flag value.
    pub fn from_flag(flag: &str) -> Result<Self> {
        match flag {
            "json" => Ok(Format::Json),
            "netscape" => Ok(Format::Netscape),
            "header" => Ok(Format::Header),
            other => Err(CookieDeckError::CommandFailed(format!(
                "unknown format '{other}' — use 'json', 'netscape', or 'header'"
            ))),
        }
    }

    /// Detect a format from a file extension; defaults to JSON.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("txt") => Format::Netscape,
            _ => Format::Json,
        }
    }

    /// Parse `content` into records.  `domain` provides defaults for
    /// formats that do not carry one (header strings).
    pub fn parse(self, content: &str, domain: &str) -> Result<Vec<CookieRecord>> {
        match self {
            Format::Json => json::parse(content),
            Format::Netscape => netscape::parse(content),
            Format::Header => header::parse(content, domain),
        }
    }

    /// Render records to text.
    pub fn format(self, records: &[CookieRecord]) -> Result<String> {
        match self {
            Format::Json => json::format(records),
            Format::Netscape => Ok(netscape::format(records)),
            Format::Header => Ok(header::format(records)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing() {
        assert_eq!(Format::from_flag("json").unwrap(), Format::Json);
        assert_eq!(Format::from_flag("netscape").unwrap(), Format::Netscape);
        assert_eq!(Format::from_flag("header").unwrap(), Format::Header);
        assert!(Format::from_flag("xml").is_err());
    }

    #[test]
    fn extension_detection() {
        assert_eq!(Format::detect(Path::new("cookies.txt")), Format::Netscape);
        assert_eq!(Format::detect(Path::new("cookies.json")), Format::Json);
        assert_eq!(Format::detect(Path::new("cookies")), Format::Json);
    }
}
