//! File-backed cookie jar.
//!
//! The jar is a plain JSON array of cookie records so it can be read
//! and hand-edited like any export.  Every mutation persists
//! immediately via an atomic write.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cookie::{CookieIdentity, CookieRecord};
use crate::errors::{CookieDeckError, Result};
use crate::storage::write_atomic;

use super::memory::MemoryCookieStore;
use super::{CookieFilter, CookieStore};

/// Cookie store persisted to a single JSON jar file.
#[derive(Debug)]
pub struct FileCookieStore {
    path: PathBuf,
    inner: MemoryCookieStore,
}

impl FileCookieStore {
    /// Open the jar at `path`; a missing file is an empty jar.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = if path.exists() {
            let bytes = fs::read(path)?;
            let records: Vec<CookieRecord> = serde_json::from_slice(&bytes).map_err(|e| {
                CookieDeckError::StoreCorrupted(format!("cookie jar is not valid JSON: {e}"))
            })?;
            MemoryCookieStore::with_records(records)
        } else {
            MemoryCookieStore::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            inner,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let records = self.inner.records();
        let bytes = serde_json::to_vec_pretty(&records)
            .map_err(|e| CookieDeckError::SerializationError(format!("cookie jar: {e}")))?;
        write_atomic(&self.path, &bytes)
    }
}

impl CookieStore for FileCookieStore {
    fn get_all(&self, filter: &CookieFilter) -> Result<Vec<CookieRecord>> {
        self.inner.get_all(filter)
    }

    fn set(&mut self, record: &CookieRecord) -> Result<CookieRecord> {
        let stored = self.inner.set(record)?;
        self.persist()?;
        Ok(stored)
    }

    fn remove(&mut self, identity: &CookieIdentity) -> Result<()> {
        self.inner.remove(identity)?;
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::SameSite;
    use tempfile::TempDir;

    fn cookie(name: &str) -> CookieRecord {
        CookieRecord::new(
            name, "v", "example.com", "/", false, false,
            SameSite::Lax, true, None,
        )
    }

    #[test]
    fn missing_jar_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileCookieStore::open(&dir.path().join("cookies.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn mutations_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cookies.json");

        let mut store = FileCookieStore::open(&path).unwrap();
        store.set(&cookie("sid")).unwrap();
        store.set(&cookie("theme")).unwrap();
        store.remove(&cookie("theme").identity()).unwrap();

        let reopened = FileCookieStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        let all = reopened.get_all(&CookieFilter::default()).unwrap();
        assert_eq!(all[0].name, "sid");
    }

    #[test]
    fn corrupt_jar_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cookies.json");
        fs::write(&path, "not json at all").unwrap();

        assert!(matches!(
            FileCookieStore::open(&path),
            Err(CookieDeckError::StoreCorrupted(_))
        ));
    }

    #[test]
    fn jar_file_is_a_plain_record_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cookies.json");

        let mut store = FileCookieStore::open(&path).unwrap();
        store.set(&cookie("sid")).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let parsed: Vec<CookieRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 1);
    }
}
