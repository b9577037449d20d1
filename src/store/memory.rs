//! In-memory cookie store, used by tests and as the backing map of the
//! file store.

use std::collections::BTreeMap;

use crate::cookie::{CookieIdentity, CookieRecord};
use crate::errors::{CookieDeckError, Result};

use super::{CookieFilter, CookieStore};

/// A plain map keyed by cookie identity.
#[derive(Debug, Clone, Default)]
pub struct MemoryCookieStore {
    cookies: BTreeMap<CookieIdentity, CookieRecord>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with records (normalizing each).
    pub fn with_records(records: Vec<CookieRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            let record = record.normalized();
            store.cookies.insert(record.identity(), record);
        }
        store
    }

    /// All records, for persistence.
    pub fn records(&self) -> Vec<CookieRecord> {
        self.cookies.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl CookieStore for MemoryCookieStore {
    fn get_all(&self, filter: &CookieFilter) -> Result<Vec<CookieRecord>> {
        Ok(self
            .cookies
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    fn set(&mut self, record: &CookieRecord) -> Result<CookieRecord> {
        if record.name.is_empty() {
            return Err(CookieDeckError::CookieStore(
                "cookie name cannot be empty".into(),
            ));
        }
        if record.domain.trim_start_matches('.').is_empty() {
            return Err(CookieDeckError::CookieStore(
                "cookie domain cannot be empty".into(),
            ));
        }

        let record = record.clone().normalized();
        self.cookies.insert(record.identity(), record.clone());
        Ok(record)
    }

    fn remove(&mut self, identity: &CookieIdentity) -> Result<()> {
        match self.cookies.remove(identity) {
            Some(_) => Ok(()),
            None => Err(CookieDeckError::CookieNotFound {
                name: identity.name.clone(),
                domain: identity.domain.clone(),
            }),
        }
    }
}
