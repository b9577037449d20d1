//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::cookie::SameSite;
use crate::errors::{CookieDeckError, Result};
use crate::session::Session;
use crate::share::{evaluate_password_strength, PasswordStrength};
use crate::storage::FileStorage;
use crate::store::FileCookieStore;

/// CookieDeck CLI: local-first HTTP cookie manager.
#[derive(Parser)]
#[command(
    name = "cookiedeck",
    about = "Local-first HTTP cookie manager with profiles and encrypted share links",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Domain to operate on (e.g. example.com)
    #[arg(short, long, global = true)]
    pub domain: Option<String>,

    /// Data directory (default: .cookiedeck)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// List cookies for the domain (or all cookies)
    List,

    /// Show a single cookie
    Get {
        /// Cookie name
        name: String,

        /// Copy the cookie value to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Create or update a cookie
    Set {
        /// Cookie name
        name: String,
        /// Cookie value (omit for interactive prompt)
        value: Option<String>,

        /// Cookie path (default: /)
        #[arg(long, default_value = "/")]
        path: String,

        /// Mark the cookie Secure
        #[arg(long)]
        secure: bool,

        /// Mark the cookie HttpOnly
        #[arg(long)]
        http_only: bool,

        /// SameSite attribute: unspecified, none, lax, or strict
        #[arg(long, default_value = "unspecified")]
        same_site: String,

        /// Store as a domain cookie (leading-dot) instead of host-only
        #[arg(long)]
        subdomains: bool,

        /// Expiration as a Unix timestamp in seconds (omit for session)
        #[arg(long)]
        expires: Option<i64>,

        /// Rename the cookie while editing it
        #[arg(long)]
        rename: Option<String>,
    },

    /// Delete a cookie (or all cookies for the domain)
    Delete {
        /// Cookie name (omit with --all)
        name: Option<String>,

        /// Cookie path, to pick between same-named cookies
        #[arg(long)]
        path: Option<String>,

        /// Delete every cookie for the domain
        #[arg(long)]
        all: bool,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Import cookies from a file
    Import {
        /// Path to the file to import
        file: String,

        /// Import format: json, netscape, or header (auto-detected from extension)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Export cookies to a file or stdout
    Export {
        /// Output format: json (default), netscape, or header
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Copy the export to the clipboard instead of printing
        #[arg(long)]
        copy: bool,
    },

    /// Build a shareable link for the domain's cookies or profiles
    Share {
        /// Share all saved profiles for the domain instead of live cookies
        #[arg(long)]
        profiles: bool,

        /// Encrypt the link with a password (prompted)
        #[arg(short, long)]
        encrypt: bool,

        /// Hours until the link expires (omit for never)
        #[arg(long)]
        ttl_hours: Option<i64>,

        /// Copy the link to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Open a share link and import its contents
    Open {
        /// The shareable URL
        url: String,

        /// Overwrite existing profiles on a profiles share
        #[arg(short, long)]
        force: bool,
    },

    /// Manage saved cookie profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Undo the most recent cookie mutation
    Undo,

    /// Re-apply the most recently undone mutation
    Redo,

    /// Show or clear the undo history
    History {
        /// Clear the history instead of showing it
        #[arg(long)]
        clear: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },

    /// View the audit log of cookie operations
    #[cfg(feature = "audit-log")]
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },
}

/// Profile subcommands.
#[derive(clap::Subcommand)]
pub enum ProfileAction {
    /// Save the domain's live cookies as a named profile
    Save {
        /// Profile name
        name: String,
        /// Overwrite an existing profile with the same name
        #[arg(short, long)]
        force: bool,
    },

    /// Replace the domain's cookies with a saved profile
    Load {
        /// Profile name
        name: String,
    },

    /// List saved profiles for the domain
    List,

    /// Rename a profile
    Rename {
        /// Current profile name
        from: String,
        /// New profile name
        to: String,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show which profile is loaded and whether it was modified
    Status,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// The session type every command works with.
pub type CliSession = Session<FileCookieStore, FileStorage>;

/// Load settings from the current directory, honoring `--data-dir`.
pub fn load_settings(cli: &Cli) -> Result<(PathBuf, Settings)> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd)?;
    if let Some(data_dir) = &cli.data_dir {
        settings.data_dir = data_dir.clone();
    }
    Ok((cwd, settings))
}

/// Open the file-backed session for this invocation.
pub fn open_session(cli: &Cli) -> Result<(CliSession, Settings, PathBuf)> {
    let (cwd, settings) = load_settings(cli)?;

    let cookies = FileCookieStore::open(&settings.jar_path(&cwd))?;
    let storage = FileStorage::open(&settings.store_path(&cwd))?;

    let session = Session::open(
        cookies,
        storage,
        settings.history_max_entries,
        settings.history_max_cookies,
    )?;

    let data_dir = settings.data_dir_path(&cwd);
    Ok((session, settings, data_dir))
}

/// The domain this command operates on; most commands require one.
pub fn require_domain(cli: &Cli) -> Result<&str> {
    cli.domain
        .as_deref()
        .ok_or_else(|| CookieDeckError::CommandFailed("specify a domain with --domain".into()))
        .and_then(|d| {
            validate_domain(d)?;
            Ok(d)
        })
}

/// Validate that a domain name is safe and sensible.
///
/// Allowed: lowercase letters, digits, hyphens, dots; an optional
/// single leading dot. Max length 253 characters. This catches typos
/// before they silently create jar entries for a bogus domain.
pub fn validate_domain(name: &str) -> Result<()> {
    let host = name.strip_prefix('.').unwrap_or(name);

    if host.is_empty() {
        return Err(CookieDeckError::ConfigError("domain cannot be empty".into()));
    }

    if name.len() > 253 {
        return Err(CookieDeckError::ConfigError(
            "domain cannot exceed 253 characters".into(),
        ));
    }

    if !host
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(CookieDeckError::ConfigError(format!(
            "domain '{name}' is invalid — only lowercase letters, digits, hyphens, and dots are allowed"
        )));
    }

    if host.starts_with('.') || host.ends_with('.') || host.contains("..") {
        return Err(CookieDeckError::ConfigError(format!(
            "domain '{name}' has a misplaced dot"
        )));
    }

    Ok(())
}

/// Parse a `--same-site` flag value.
pub fn parse_same_site(flag: &str) -> Result<SameSite> {
    match flag {
        "unspecified" => Ok(SameSite::Unspecified),
        "none" => Ok(SameSite::NoRestriction),
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        other => Err(CookieDeckError::CommandFailed(format!(
            "unknown SameSite value '{other}' — use 'unspecified', 'none', 'lax', or 'strict'"
        ))),
    }
}

/// Get the share password for decryption, trying in order:
/// 1. `COOKIEDECK_PASSWORD` env var (scripted use)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_share_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("COOKIEDECK_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter share password")
        .interact()
        .map_err(|e| CookieDeckError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new share password with confirmation.
///
/// Strength feedback is advisory only — a weak password warns but
/// never blocks. Also respects `COOKIEDECK_PASSWORD` for scripted use.
pub fn prompt_new_share_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("COOKIEDECK_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let password = dialoguer::Password::new()
        .with_prompt("Choose share password")
        .with_confirmation("Confirm share password", "Passwords do not match, try again")
        .interact()
        .map_err(|e| CookieDeckError::CommandFailed(format!("password prompt: {e}")))?;

    match evaluate_password_strength(&password) {
        PasswordStrength::Weak => {
            output::warning("Password strength: weak — consider a longer passphrase.");
        }
        strength => {
            output::tip(&format!("Password strength: {}", strength.label()));
        }
    }

    Ok(Zeroizing::new(password))
}

/// Copy text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| CookieDeckError::CommandFailed(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| CookieDeckError::CommandFailed(format!("clipboard write: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_domains() {
        assert!(validate_domain("example.com").is_ok());
        assert!(validate_domain(".example.com").is_ok());
        assert!(validate_domain("sub.app.example.co.uk").is_ok());
        assert!(validate_domain("localhost").is_ok());
        assert!(validate_domain("my-site.io").is_ok());
    }

    #[test]
    fn rejects_empty_domain() {
        assert!(validate_domain("").is_err());
        assert!(validate_domain(".").is_err());
    }

    #[test]
    fn rejects_uppercase_and_special_chars() {
        assert!(validate_domain("Example.com").is_err());
        assert!(validate_domain("exa mple.com").is_err());
        assert!(validate_domain("example.com/path").is_err());
    }

    #[test]
    fn rejects_misplaced_dots() {
        assert!(validate_domain("..example.com").is_err());
        assert!(validate_domain("example..com").is_err());
        assert!(validate_domain("example.com.").is_err());
    }

    #[test]
    fn rejects_overlong_domain() {
        let long = format!("{}.com", "a".repeat(253));
        assert!(validate_domain(&long).is_err());
    }

    #[test]
    fn same_site_parsing() {
        assert_eq!(parse_same_site("lax").unwrap(), SameSite::Lax);
        assert_eq!(parse_same_site("strict").unwrap(), SameSite::Strict);
        assert_eq!(parse_same_site("none").unwrap(), SameSite::NoRestriction);
        assert_eq!(parse_same_site("unspecified").unwrap(), SameSite::Unspecified);
        assert!(parse_same_site("always").is_err());
    }
}
