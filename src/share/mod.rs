//! Cookie sharing: payload codec, encrypted envelope, and URL transport.
//!
//! A share starts as a `SharePayload` (cookies or whole profile sets for
//! one domain).  It is optionally sealed into an `EncryptedEnvelope`
//! with a password, then either form is embedded in the fragment of a
//! fixed-host URL.  The data never leaves the URL — there is no server
//! component.
//!
//! Dependency order: `codec` → `envelope` → `transport`.

pub mod codec;
pub mod envelope;
pub mod password;
pub mod transport;

pub use codec::{ShareKind, SharePayload};
pub use envelope::{open_payload, seal_payload, EncryptedEnvelope};
pub use password::{evaluate_password_strength, PasswordStrength};
pub use transport::{from_shareable_url, to_shareable_url, ShareItem};
