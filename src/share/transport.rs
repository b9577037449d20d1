//! Shareable URL transport.
//!
//! A share item (plaintext payload or encrypted envelope) is JSON
//! encoded, base64url encoded (URL-safe alphabet, no padding), and
//! embedded as the fragment of a fixed base URL.  Fragments never
//! reach a server, so the cookie data stays between the two ends.
//!
//! Extraction runs speculatively on whatever string the user hands us,
//! so `from_shareable_url` returns `None` for anything that is not a
//! share link — it never errors.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;

use crate::errors::{CookieDeckError, Result};

use super::codec::SharePayload;
use super::envelope::EncryptedEnvelope;

/// Base URL share links are built on.
pub const SHARE_BASE_URL: &str = "https://cookiedeck.dev/share";

/// Either wire form of a share.
#[derive(Debug, Clone, PartialEq)]
pub enum ShareItem {
    Plain(SharePayload),
    Encrypted(EncryptedEnvelope),
}

/// Build a shareable URL with the item encoded in the fragment.
pub fn to_shareable_url(item: &ShareItem) -> Result<String> {
    to_shareable_url_with_base(item, SHARE_BASE_URL)
}

/// Same as `to_shareable_url` with a caller-chosen base (from settings).
pub fn to_shareable_url_with_base(item: &ShareItem, base: &str) -> Result<String> {
    let json = match item {
        ShareItem::Plain(payload) => serde_json::to_vec(payload),
        ShareItem::Encrypted(envelope) => serde_json::to_vec(envelope),
    }
    .map_err(|e| CookieDeckError::SerializationError(format!("share item: {e}")))?;

    let fragment = URL_SAFE_NO_PAD.encode(json);
    Ok(format!("{base}#{fragment}"))
}

/// Extract a share item from a URL, if one is present.
///
/// Returns `None` when the URL has no fragment, the fragment is not
/// base64url, or the decoded JSON matches neither wire shape.
pub fn from_shareable_url(url: &str) -> Option<ShareItem> {
    let (_, fragment) = url.split_once('#')?;
    if fragment.is_empty() {
        return None;
    }

    // Tolerate senders that padded the fragment.
    let fragment = fragment.trim_end_matches('=');

    let bytes = URL_SAFE_NO_PAD.decode(fragment).ok()?;
    let value: Value = serde_json::from_slice(&bytes).ok()?;

    if value.get("encrypted").and_then(Value::as_bool) == Some(true) {
        let envelope: EncryptedEnvelope = serde_json::from_value(value).ok()?;
        Some(ShareItem::Encrypted(envelope))
    } else {
        SharePayload::from_value(value).ok().map(ShareItem::Plain)
    }
}
