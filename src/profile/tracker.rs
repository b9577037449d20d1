//! Profile modification tracking.
//!
//! When a profile is loaded, the tracker records a digest of the live
//! cookie set.  After any later mutation, comparing a fresh digest to
//! the stored one tells the UI whether the loaded profile has been
//! modified.  The digest is order-independent: two cookie sets that
//! differ only in ordering compare equal.
//!
//! Every record field participates in the digest — editing a flag
//! (`secure`, `httpOnly`, `sameSite`) counts as a modification just
//! like editing the value.  Records are normalized first so host-only
//! dot-stripping cannot cause false positives.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::cookie::CookieRecord;

/// Hex-encoded SHA-256 digest over a normalized, sorted cookie set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotDigest(String);

impl SnapshotDigest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// ASCII unit separator — cannot appear in cookie attribute text that
/// came off the wire, so fields can be joined without ambiguity.
const FIELD_SEP: char = '\u{1f}';

/// Compute the order-independent digest of a cookie set.
pub fn snapshot(cookies: &[CookieRecord]) -> SnapshotDigest {
    let mut lines: Vec<String> = cookies
        .iter()
        .map(|c| {
            let c = c.clone().normalized();
            let mut line = String::new();
            for field in [
                c.name.as_str(),
                c.value.as_str(),
                c.domain.as_str(),
                c.path.as_str(),
            ] {
                line.push_str(field);
                line.push(FIELD_SEP);
            }
            line.push_str(&format!(
                "{}{sep}{}{sep}{}{sep}{}{sep}{}",
                c.secure,
                c.http_only,
                c.same_site.label(),
                c.host_only,
                c.expiration_date.map_or_else(|| "session".to_string(), |e| e.to_string()),
                sep = FIELD_SEP,
            ));
            line
        })
        .collect();

    lines.sort_unstable();

    let mut hasher = Sha256::new();
    for line in &lines {
        // Length prefix keeps adjacent lines from gluing together.
        hasher.update((line.len() as u64).to_le_bytes());
        hasher.update(line.as_bytes());
    }

    let digest = hasher.finalize();
    let mut hex = String::with_capacity(64);
    for byte in digest {
        hex.push_str(&format!("{byte:02x}"));
    }
    SnapshotDigest(hex)
}

/// Per-domain tracking state: which profile is loaded and whether the
/// live set has drifted from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileMeta {
    /// Name of the last-loaded profile, if any.
    #[serde(default)]
    pub last_loaded: Option<String>,

    /// Whether the live set differed from the snapshot at last check.
    #[serde(default)]
    pub modified: bool,

    /// Digest of the live set at load time.
    #[serde(default)]
    pub snapshot: Option<SnapshotDigest>,
}

impl ProfileMeta {
    /// Record that `name` was just loaded with the given live set.
    pub fn mark_loaded(&mut self, name: impl Into<String>, cookies: &[CookieRecord]) {
        self.last_loaded = Some(name.into());
        self.modified = false;
        self.snapshot = Some(snapshot(cookies));
    }

    /// Compare the live set against the load-time snapshot.
    ///
    /// Returns `false` when no profile is currently loaded.
    pub fn is_modified(&self, live: &[CookieRecord]) -> bool {
        if self.last_loaded.is_none() {
            return false;
        }
        match &self.snapshot {
            Some(stored) => snapshot(live) != *stored,
            None => false,
        }
    }

    /// Recompute and cache the modified flag; returns the new value.
    ///
    /// Called by the session after every cookie-mutating operation.
    pub fn refresh(&mut self, live: &[CookieRecord]) -> bool {
        self.modified = self.is_modified(live);
        self.modified
    }

    /// Forget the loaded profile (it was deleted, or tracking reset).
    pub fn clear_loaded(&mut self) {
        self.last_loaded = None;
        self.modified = false;
        self.snapshot = None;
    }
}
