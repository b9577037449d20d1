//! The keyed-JSON storage boundary.
//!
//! `Storage` stands in for the host's persistent key/value store: the
//! session keeps profiles, history, and preferences under well-known
//! keys.  `FileStorage` holds everything in one JSON document:
//!
//! ```text
//! { "magic": "CDSTORE", "version": 1, "digest": "<sha256>", "data": { ... } }
//! ```
//!
//! The digest is computed over the canonical serialization of `data`
//! (serde_json emits object keys sorted, so the bytes are stable) and
//! detects file corruption on load.  Writes go through a temp file in
//! the same directory plus a rename, so readers never see a
//! half-written store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::errors::{CookieDeckError, Result};

/// Magic marker at the top of every store file.
const MAGIC: &str = "CDSTORE";

/// Current store format version.
const CURRENT_VERSION: u8 = 1;

/// Narrow interface to the host key/value store.
pub trait Storage {
    /// Fetch the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, persisting immediately.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

impl<T: Storage + ?Sized> Storage for &mut T {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        (**self).set(key, value)
    }
}

// ---------------------------------------------------------------------------
// File-backed implementation
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    magic: String,
    version: u8,
    digest: String,
    data: BTreeMap<String, Value>,
}

/// Single-file JSON store with a corruption-detecting digest.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    data: BTreeMap<String, Value>,
}

impl FileStorage {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is an empty store; a present file must carry the
    /// magic marker, a supported version, and a matching digest.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                path: path.to_path_buf(),
                data: BTreeMap::new(),
            });
        }

        let bytes = fs::read(path)?;
        let file: StoreFile = serde_json::from_slice(&bytes)
            .map_err(|e| CookieDeckError::StoreCorrupted(format!("bad JSON: {e}")))?;

        if file.magic != MAGIC {
            return Err(CookieDeckError::StoreCorrupted(
                "missing CDSTORE magic marker".into(),
            ));
        }
        if file.version != CURRENT_VERSION {
            return Err(CookieDeckError::StoreCorrupted(format!(
                "unsupported version {}, expected {CURRENT_VERSION}",
                file.version
            )));
        }

        let expected = digest_of(&file.data)?;
        if expected != file.digest {
            return Err(CookieDeckError::StoreCorrupted(
                "digest mismatch — file contents were altered or damaged".into(),
            ));
        }

        Ok(Self {
            path: path.to_path_buf(),
            data: file.data,
        })
    }

    fn save(&self) -> Result<()> {
        let file = StoreFile {
            magic: MAGIC.to_string(),
            version: CURRENT_VERSION,
            digest: digest_of(&self.data)?,
            data: self.data.clone(),
        };

        let bytes = serde_json::to_vec_pretty(&file)
            .map_err(|e| CookieDeckError::SerializationError(format!("store file: {e}")))?;

        write_atomic(&self.path, &bytes)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.data.insert(key.to_string(), value);
        self.save()
    }
}

// ---------------------------------------------------------------------------
// In-memory implementation (tests)
// ---------------------------------------------------------------------------

/// Storage that forgets everything on drop.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: BTreeMap<String, Value>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.data.insert(key.to_string(), value);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Hex SHA-256 over the canonical JSON serialization of `data`.
fn digest_of(data: &BTreeMap<String, Value>) -> Result<String> {
    let bytes = serde_json::to_vec(data)
        .map_err(|e| CookieDeckError::SerializationError(format!("store data: {e}")))?;

    let digest = Sha256::digest(&bytes);
    let mut hex = String::with_capacity(64);
    for byte in digest {
        hex.push_str(&format!("{byte:02x}"));
    }
    Ok(hex)
}

/// Write a file atomically: temp file in the same directory, then
/// rename over the target so readers never see a partial write.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}
