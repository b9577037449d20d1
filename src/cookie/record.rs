//! The `CookieRecord` type — one HTTP cookie's attributes.
//!
//! Field names serialize in camelCase (`httpOnly`, `hostOnly`,
//! `expirationDate`) so share payloads and JSON exports keep the wire
//! shape cookie tooling expects.
//!
//! Normalization invariant: a host-only cookie never carries a
//! leading-dot domain.  `CookieRecord::new` enforces this once, at
//! construction, so call sites never strip dots themselves.

use serde::{Deserialize, Serialize};

/// SameSite attribute values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameSite {
    #[default]
    Unspecified,
    NoRestriction,
    Lax,
    Strict,
}

impl SameSite {
    /// Short lowercase label used in table output.
    pub fn label(self) -> &'static str {
        match self {
            SameSite::Unspecified => "unspecified",
            SameSite::NoRestriction => "none",
            SameSite::Lax => "lax",
            SameSite::Strict => "strict",
        }
    }
}

/// One HTTP cookie's attributes.
///
/// `expiration_date` is a Unix timestamp in seconds; `None` marks a
/// session cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,

    #[serde(default)]
    pub secure: bool,

    #[serde(default)]
    pub http_only: bool,

    #[serde(default)]
    pub same_site: SameSite,

    #[serde(default)]
    pub host_only: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<i64>,
}

/// The identity key the cookie store uses: `(name, domain, path)`.
///
/// Two records with the same identity refer to the same stored cookie;
/// setting one overwrites the other.  Domain is compared in its
/// dot-stripped form so `.example.com` and `example.com` collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CookieIdentity {
    pub name: String,
    pub domain: String,
    pub path: String,
}

impl CookieRecord {
    /// Build a normalized record.
    ///
    /// Strips the leading dot from the domain when `host_only` is set,
    /// and defaults an empty path to `/`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
        path: impl Into<String>,
        secure: bool,
        http_only: bool,
        same_site: SameSite,
        host_only: bool,
        expiration_date: Option<i64>,
    ) -> Self {
        let mut domain = domain.into();
        if host_only {
            while domain.starts_with('.') {
                domain.remove(0);
            }
        }

        let path = path.into();
        let path = if path.is_empty() { "/".to_string() } else { path };

        Self {
            name: name.into(),
            value: value.into(),
            domain,
            path,
            secure,
            http_only,
            same_site,
            host_only,
            expiration_date,
        }
    }

    /// Re-apply the construction invariants to a record that was
    /// deserialized from an external source (import file, share link).
    pub fn normalized(mut self) -> Self {
        if self.host_only {
            while self.domain.starts_with('.') {
                self.domain.remove(0);
            }
        }
        if self.path.is_empty() {
            self.path = "/".to_string();
        }
        self
    }

    /// `true` if the cookie has no expiration (lives for the session).
    pub fn is_session(&self) -> bool {
        self.expiration_date.is_none()
    }

    /// `true` if the cookie's expiration timestamp has passed.
    ///
    /// Session cookies never expire by timestamp.
    pub fn is_expired(&self, now: i64) -> bool {
        match self.expiration_date {
            Some(ts) => ts <= now,
            None => false,
        }
    }

    /// The domain with any leading dot removed — a valid URL host.
    pub fn host(&self) -> &str {
        self.domain.trim_start_matches('.')
    }

    /// Reconstruct the origin URL for this cookie.
    ///
    /// Secure cookies get an `https://` origin; everything else `http://`.
    /// Used when building specs for the cookie-store boundary.
    pub fn url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}{}", scheme, self.host(), self.path)
    }

    /// The store identity key: `(name, dot-stripped domain, path)`.
    pub fn identity(&self) -> CookieIdentity {
        CookieIdentity {
            name: self.name.clone(),
            domain: self.host().to_string(),
            path: self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, domain: &str, host_only: bool) -> CookieRecord {
        CookieRecord::new(
            name,
            "v",
            domain,
            "/",
            false,
            false,
            SameSite::Lax,
            host_only,
            None,
        )
    }

    #[test]
    fn host_only_strips_leading_dot() {
        let c = record("sid", ".example.com", true);
        assert_eq!(c.domain, "example.com");
    }

    #[test]
    fn domain_cookie_keeps_leading_dot() {
        let c = record("sid", ".example.com", false);
        assert_eq!(c.domain, ".example.com");
        assert_eq!(c.host(), "example.com");
    }

    #[test]
    fn empty_path_defaults_to_root() {
        let c = CookieRecord::new(
            "a", "b", "example.com", "", false, false,
            SameSite::Unspecified, true, None,
        );
        assert_eq!(c.path, "/");
    }

    #[test]
    fn url_uses_https_for_secure_cookies() {
        let mut c = record("sid", ".example.com", false);
        c.secure = true;
        assert_eq!(c.url(), "https://example.com/");
    }

    #[test]
    fn url_uses_http_for_insecure_cookies() {
        let c = record("sid", "example.com", true);
        assert_eq!(c.url(), "http://example.com/");
    }

    #[test]
    fn session_cookie_never_expires() {
        let c = record("sid", "example.com", true);
        assert!(c.is_session());
        assert!(!c.is_expired(i64::MAX));
    }

    #[test]
    fn expired_cookie_detected() {
        let mut c = record("sid", "example.com", true);
        c.expiration_date = Some(1_000);
        assert!(c.is_expired(1_001));
        assert!(!c.is_expired(999));
    }

    #[test]
    fn identity_collides_across_dot_forms() {
        let bare = record("sid", "example.com", true);
        let dotted = record("sid", ".example.com", false);
        assert_eq!(bare.identity(), dotted.identity());
    }

    #[test]
    fn serde_uses_camel_case_wire_names() {
        let c = CookieRecord::new(
            "sid", "abc", "example.com", "/", true, true,
            SameSite::Strict, true, Some(1_700_000_000),
        );
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["httpOnly"], true);
        assert_eq!(json["hostOnly"], true);
        assert_eq!(json["sameSite"], "strict");
        assert_eq!(json["expirationDate"], 1_700_000_000i64);
    }

    #[test]
    fn session_cookie_omits_expiration_field() {
        let c = record("sid", "example.com", true);
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("expirationDate").is_none());
    }
}
