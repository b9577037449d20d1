//! Password-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that makes brute-forcing short share
//! passwords expensive.  The parameters used to seal an envelope are
//! stored inside it, so the receiving side re-derives the exact same
//! key regardless of its local configuration.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::errors::{CookieDeckError, Result};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Argon2id cost parameters.
///
/// These travel inside encrypted share envelopes and map 1:1 to the
/// fields in `Settings`, so senders can tune them in `.cookiedeck.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Derive a 32-byte key from a password and salt with explicit params.
///
/// The same password + salt + params always produce the same key.
/// Enforces minimum parameters so a hand-edited envelope cannot force a
/// dangerously cheap derivation.
pub fn derive_key(password: &[u8], salt: &[u8], kdf: &KdfParams) -> Result<[u8; KEY_LEN]> {
    if kdf.memory_kib < MIN_MEMORY_KIB {
        return Err(CookieDeckError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            kdf.memory_kib
        )));
    }
    if kdf.iterations < 1 {
        return Err(CookieDeckError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if kdf.parallelism < 1 {
        return Err(CookieDeckError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let params =
        Params::new(kdf.memory_kib, kdf.iterations, kdf.parallelism, Some(KEY_LEN)).map_err(
            |e| CookieDeckError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")),
        )?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2.hash_password_into(password, salt, &mut key).map_err(|e| {
        CookieDeckError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}"))
    })?;

    Ok(key)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    // Above-minimum but small params keep the tests fast.
    fn test_params() -> KdfParams {
        KdfParams {
            memory_kib: MIN_MEMORY_KIB,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn same_inputs_same_key() {
        let salt = generate_salt();
        let k1 = derive_key(b"pw", &salt, &test_params()).unwrap();
        let k2 = derive_key(b"pw", &salt, &test_params()).unwrap();
        assert_eq!(k1, k2);
    }

    #[test]
    fn different_salts_different_keys() {
        let k1 = derive_key(b"pw", &generate_salt(), &test_params()).unwrap();
        let k2 = derive_key(b"pw", &generate_salt(), &test_params()).unwrap();
        assert_ne!(k1, k2);
    }

    #[test]
    fn different_passwords_different_keys() {
        let salt = generate_salt();
        let k1 = derive_key(b"password-one", &salt, &test_params()).unwrap();
        let k2 = derive_key(b"password-two", &salt, &test_params()).unwrap();
        assert_ne!(k1, k2);
    }

    #[test]
    fn rejects_weak_memory_cost() {
        let weak = KdfParams {
            memory_kib: 1_024,
            iterations: 3,
            parallelism: 4,
        };
        assert!(derive_key(b"pw", &generate_salt(), &weak).is_err());
    }

    #[test]
    fn rejects_zero_iterations() {
        let weak = KdfParams {
            memory_kib: MIN_MEMORY_KIB,
            iterations: 0,
            parallelism: 1,
        };
        assert!(derive_key(b"pw", &generate_salt(), &weak).is_err());
    }

    #[test]
    fn salts_are_unique() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
