//! Cookie domain types: the `CookieRecord` and its attribute enums.

pub mod record;

pub use record::{CookieIdentity, CookieRecord, SameSite};
