use thiserror::Error;

/// All errors that can occur in CookieDeck.
#[derive(Debug, Error)]
pub enum CookieDeckError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Invalid password or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Share errors ---
    #[error("Malformed share payload: {0}")]
    MalformedPayload(String),

    #[error("This shared link has expired")]
    ExpiredShare,

    // --- Cookie store errors ---
    #[error("Cookie store error: {0}")]
    CookieStore(String),

    #[error("Cookie '{name}' not found for {domain}")]
    CookieNotFound { name: String, domain: String },

    // --- Profile errors ---
    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("Profile '{0}' already exists (use --force to overwrite)")]
    ProfileAlreadyExists(String),

    // --- Storage errors ---
    #[error("Store file is corrupted: {0}")]
    StoreCorrupted(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    // --- Audit errors ---
    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for CookieDeck results.
pub type Result<T> = std::result::Result<T, CookieDeckError>;
