//! Cryptographic primitives for CookieDeck.
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption (`cipher`)
//! - Argon2id password-based key derivation (`kdf`)
//!
//! Both are consumed by the share envelope layer; nothing else in the
//! crate touches key material directly.

pub mod cipher;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, derive_key, ...};
pub use cipher::{open, seal, NONCE_LEN};
pub use kdf::{derive_key, generate_salt, KdfParams, SALT_LEN};
