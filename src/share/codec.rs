//! Share payload codec.
//!
//! The wire shape uses the short keys the original payload format
//! established: `{type, d, c, p, e, t}` where `d` is the domain, `c`
//! the cookie list (type `cookies`), `p` the name → cookies map (type
//! `profiles`), `e` the expiry timestamp (`0` = never), and `t` the
//! creation timestamp.  Decoding is shape-checked and fails with
//! `MalformedPayload`; it never panics on foreign input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cookie::CookieRecord;
use crate::errors::{CookieDeckError, Result};

/// What a share payload carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareKind {
    Cookies,
    Profiles,
}

/// A decoded (plaintext) share payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharePayload {
    #[serde(rename = "type")]
    pub kind: ShareKind,

    /// The domain the cookies belong to.
    #[serde(rename = "d")]
    pub domain: String,

    /// Cookie list (present iff `kind == Cookies`).
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<CookieRecord>>,

    /// Profile name → cookie list (present iff `kind == Profiles`).
    #[serde(rename = "p", default, skip_serializing_if = "Option::is_none")]
    pub profiles: Option<BTreeMap<String, Vec<CookieRecord>>>,

    /// Unix seconds after which the share should be refused; `0` = never.
    #[serde(rename = "e")]
    pub expires_at: i64,

    /// Unix seconds at which the share was created.
    #[serde(rename = "t")]
    pub created_at: i64,
}

impl SharePayload {
    /// Build a `cookies` payload.  The caller guarantees `cookies` is
    /// non-empty; records are normalized on the way in.
    pub fn cookies(
        cookies: Vec<CookieRecord>,
        domain: impl Into<String>,
        expires_at: i64,
        created_at: i64,
    ) -> Self {
        Self {
            kind: ShareKind::Cookies,
            domain: domain.into(),
            cookies: Some(cookies.into_iter().map(CookieRecord::normalized).collect()),
            profiles: None,
            expires_at,
            created_at,
        }
    }

    /// Build a `profiles` payload from a name → cookies map.
    pub fn profiles(
        profiles: BTreeMap<String, Vec<CookieRecord>>,
        domain: impl Into<String>,
        expires_at: i64,
        created_at: i64,
    ) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|(name, cookies)| {
                (name, cookies.into_iter().map(CookieRecord::normalized).collect())
            })
            .collect();

        Self {
            kind: ShareKind::Profiles,
            domain: domain.into(),
            cookies: None,
            profiles: Some(profiles),
            expires_at,
            created_at,
        }
    }

    /// Decode a raw JSON value into a payload, validating its shape.
    pub fn from_value(raw: Value) -> Result<Self> {
        let obj = raw
            .as_object()
            .ok_or_else(|| CookieDeckError::MalformedPayload("payload is not an object".into()))?;

        // Validate the discriminant before handing off to serde so the
        // error names the field that is actually wrong.
        match obj.get("type").and_then(Value::as_str) {
            Some("cookies") => {
                if !obj.get("c").is_some_and(Value::is_array) {
                    return Err(CookieDeckError::MalformedPayload(
                        "cookies payload is missing the 'c' array".into(),
                    ));
                }
            }
            Some("profiles") => {
                if !obj.get("p").is_some_and(Value::is_object) {
                    return Err(CookieDeckError::MalformedPayload(
                        "profiles payload is missing the 'p' object".into(),
                    ));
                }
            }
            Some(other) => {
                return Err(CookieDeckError::MalformedPayload(format!(
                    "unknown payload type '{other}'"
                )));
            }
            None => {
                return Err(CookieDeckError::MalformedPayload(
                    "missing 'type' field".into(),
                ));
            }
        }

        if !obj.get("d").is_some_and(|d| d.as_str().is_some_and(|s| !s.is_empty())) {
            return Err(CookieDeckError::MalformedPayload(
                "missing or empty 'd' (domain) field".into(),
            ));
        }

        let payload: SharePayload = serde_json::from_value(raw)
            .map_err(|e| CookieDeckError::MalformedPayload(format!("bad field shape: {e}")))?;

        Ok(payload.normalized())
    }

    /// Re-apply record normalization after deserializing foreign input.
    fn normalized(mut self) -> Self {
        if let Some(cookies) = self.cookies.take() {
            self.cookies = Some(cookies.into_iter().map(CookieRecord::normalized).collect());
        }
        if let Some(profiles) = self.profiles.take() {
            self.profiles = Some(
                profiles
                    .into_iter()
                    .map(|(name, cookies)| {
                        (name, cookies.into_iter().map(CookieRecord::normalized).collect())
                    })
                    .collect(),
            );
        }
        self
    }

    /// Advisory expiry check — the consumer decides what to do with it.
    ///
    /// `expires_at == 0` means the share never expires.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at != 0 && now > self.expires_at
    }

    /// Total number of cookie records in the payload.
    pub fn cookie_count(&self) -> usize {
        match self.kind {
            ShareKind::Cookies => self.cookies.as_ref().map_or(0, Vec::len),
            ShareKind::Profiles => self
                .profiles
                .as_ref()
                .map_or(0, |p| p.values().map(Vec::len).sum()),
        }
    }
}
