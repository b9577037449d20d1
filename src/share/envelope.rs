//! Password-encrypted share envelopes.
//!
//! `seal_payload` turns a `SharePayload` into an `EncryptedEnvelope`:
//! a fresh random salt feeds Argon2id to derive an AES-256-GCM key,
//! and the UTF-8 JSON encoding of the payload is sealed under a fresh
//! random nonce.  Salt and nonce are generated here and only here —
//! callers cannot supply them, so a nonce can never be reused under a
//! derived key.
//!
//! The payload `type` lives inside the ciphertext.  The envelope's
//! cleartext carries nothing but the `encrypted` marker and the crypto
//! parameters, so a tampered discriminant cannot steer interpretation
//! of the plaintext.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::crypto::{cipher, kdf, KdfParams};
use crate::errors::{CookieDeckError, Result};

use super::codec::SharePayload;

/// Crypto material for one sealed payload.  Binary fields serialize as
/// base64 strings so the envelope embeds cleanly in a URL fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeParams {
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub nonce: Vec<u8>,

    /// Ciphertext with the 16-byte GCM tag appended.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub ciphertext: Vec<u8>,

    /// KDF cost parameters used by the sender; the receiver re-derives
    /// with exactly these.
    pub kdf: KdfParams,
}

/// An encrypted share payload as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    /// Always `true`; the transport layer uses it to tell envelopes
    /// from plaintext payloads.
    pub encrypted: bool,

    pub params: EnvelopeParams,
}

/// Seal a payload under a password.
pub fn seal_payload(
    payload: &SharePayload,
    password: &str,
    kdf_params: &KdfParams,
) -> Result<EncryptedEnvelope> {
    let plaintext = serde_json::to_vec(payload)
        .map_err(|e| CookieDeckError::SerializationError(format!("payload: {e}")))?;

    let salt = kdf::generate_salt();
    let mut key = kdf::derive_key(password.as_bytes(), &salt, kdf_params)?;

    let sealed = cipher::seal(&key, &plaintext);
    key.zeroize();
    let (nonce, ciphertext) = sealed?;

    Ok(EncryptedEnvelope {
        encrypted: true,
        params: EnvelopeParams {
            salt: salt.to_vec(),
            nonce: nonce.to_vec(),
            ciphertext,
            kdf: *kdf_params,
        },
    })
}

/// Open an envelope with a password.
///
/// Wrong password, truncated data, and tampered ciphertext all fail
/// with the same `DecryptionFailed` — callers must not be able to tell
/// them apart.
pub fn open_payload(envelope: &EncryptedEnvelope, password: &str) -> Result<SharePayload> {
    let mut key = kdf::derive_key(password.as_bytes(), &envelope.params.salt, &envelope.params.kdf)?;

    let opened = cipher::open(&key, &envelope.params.nonce, &envelope.params.ciphertext);
    key.zeroize();
    let mut plaintext = opened?;

    let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_slice(&plaintext);
    plaintext.zeroize();

    let value = parsed
        .map_err(|e| CookieDeckError::MalformedPayload(format!("decrypted payload is not JSON: {e}")))?;

    SharePayload::from_value(value)
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::{CookieRecord, SameSite};

    // Cheap KDF params so the tests stay fast; minimums still hold.
    fn fast_kdf() -> KdfParams {
        KdfParams {
            memory_kib: 8_192,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn payload() -> SharePayload {
        let cookie = CookieRecord::new(
            "sid", "abc123", "example.com", "/", true, true,
            SameSite::Lax, true, Some(2_000_000_000),
        );
        SharePayload::cookies(vec![cookie], "example.com", 0, 1_700_000_000)
    }

    #[test]
    fn seal_open_roundtrip() {
        let envelope = seal_payload(&payload(), "correct-horse", &fast_kdf()).unwrap();
        assert!(envelope.encrypted);

        let recovered = open_payload(&envelope, "correct-horse").unwrap();
        assert_eq!(recovered, payload());
    }

    #[test]
    fn wrong_password_fails_with_decryption_failed() {
        let envelope = seal_payload(&payload(), "correct-horse", &fast_kdf()).unwrap();
        let err = open_payload(&envelope, "wrong").unwrap_err();
        assert!(matches!(err, CookieDeckError::DecryptionFailed));
    }

    #[test]
    fn tampered_ciphertext_fails_identically_to_wrong_password() {
        let mut envelope = seal_payload(&payload(), "pw-123456", &fast_kdf()).unwrap();
        let last = envelope.params.ciphertext.len() - 1;
        envelope.params.ciphertext[last] ^= 0x01;

        let err = open_payload(&envelope, "pw-123456").unwrap_err();
        assert!(matches!(err, CookieDeckError::DecryptionFailed));
    }

    #[test]
    fn fresh_salt_and_nonce_per_seal() {
        let e1 = seal_payload(&payload(), "pw", &fast_kdf()).unwrap();
        let e2 = seal_payload(&payload(), "pw", &fast_kdf()).unwrap();
        assert_ne!(e1.params.salt, e2.params.salt);
        assert_ne!(e1.params.nonce, e2.params.nonce);
        assert_ne!(e1.params.ciphertext, e2.params.ciphertext);
    }

    #[test]
    fn envelope_json_has_base64_fields_and_marker() {
        let envelope = seal_payload(&payload(), "pw", &fast_kdf()).unwrap();
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["encrypted"], true);
        assert!(value["params"]["salt"].is_string());
        assert!(value["params"]["nonce"].is_string());
        assert!(value["params"]["ciphertext"].is_string());
        // No cleartext payload type anywhere in the envelope.
        assert!(value.get("type").is_none());
        assert!(value["params"].get("type").is_none());
    }

    #[test]
    fn envelope_roundtrips_through_json() {
        let envelope = seal_payload(&payload(), "pw", &fast_kdf()).unwrap();
        let json = serde_json::to_string(&envelope).unwrap();
        let back: EncryptedEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, envelope);

        let recovered = open_payload(&back, "pw").unwrap();
        assert_eq!(recovered, payload());
    }
}
