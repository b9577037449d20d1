//! AES-256-GCM authenticated encryption.
//!
//! `seal` generates a fresh random 12-byte nonce on every call and
//! returns it alongside the ciphertext — the nonce is never accepted
//! as input, which makes nonce reuse under one key unrepresentable.
//! The GCM authentication tag rides at the end of the ciphertext.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{CookieDeckError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns `(nonce, ciphertext)`; the share envelope stores the two as
/// separate fields.
pub fn seal(key: &[u8], plaintext: &[u8]) -> Result<([u8; NONCE_LEN], Vec<u8>)> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| CookieDeckError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| CookieDeckError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok((nonce.into(), ciphertext))
}

/// Decrypt and authenticate data produced by `seal`.
///
/// Every failure collapses into `DecryptionFailed`: a wrong key and a
/// tampered ciphertext are indistinguishable to the caller.
pub fn open(key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if nonce.len() != NONCE_LEN {
        return Err(CookieDeckError::DecryptionFailed);
    }

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CookieDeckError::DecryptionFailed)?;

    let nonce = Nonce::from_slice(nonce);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| CookieDeckError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_open_roundtrip() {
        let key = [0xABu8; 32];
        let plaintext = b"{\"type\":\"cookies\"}";

        let (nonce, ct) = seal(&key, plaintext).unwrap();
        // Ciphertext carries the 16-byte tag.
        assert_eq!(ct.len(), plaintext.len() + 16);

        let recovered = open(&key, &nonce, &ct).unwrap();
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn seal_generates_fresh_nonce_each_call() {
        let key = [0xCDu8; 32];
        let (n1, c1) = seal(&key, b"same input").unwrap();
        let (n2, c2) = seal(&key, b"same input").unwrap();
        assert_ne!(n1, n2, "two seals must use different nonces");
        assert_ne!(c1, c2);
    }

    #[test]
    fn open_with_wrong_key_fails() {
        let (nonce, ct) = seal(&[0x11u8; 32], b"secret").unwrap();
        assert!(open(&[0x22u8; 32], &nonce, &ct).is_err());
    }

    #[test]
    fn open_with_corrupted_ciphertext_fails() {
        let key = [0xBBu8; 32];
        let (nonce, mut ct) = seal(&key, b"secret").unwrap();
        ct[0] ^= 0xFF;
        assert!(open(&key, &nonce, &ct).is_err());
    }

    #[test]
    fn open_with_bad_nonce_length_fails() {
        let key = [0xEEu8; 32];
        let (_, ct) = seal(&key, b"secret").unwrap();
        assert!(open(&key, &[0u8; 5], &ct).is_err());
    }
}
