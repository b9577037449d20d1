//! The cookie-store boundary.
//!
//! `CookieStore` is the narrow interface to whatever actually holds
//! the cookies — a local jar file here, a browser store elsewhere.
//! The trait treats `(name, domain, path)` as the identity key, so an
//! edit that changes any identity field must remove the old cookie
//! before setting the new one; `apply_edit` sequences that.
//!
//! Batch helpers never abort on the first failure: they count per-item
//! failures and report in aggregate.

pub mod file;
pub mod memory;

use crate::cookie::{CookieIdentity, CookieRecord};
use crate::errors::Result;

pub use file::FileCookieStore;
pub use memory::MemoryCookieStore;

/// Filter for `get_all`.  Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct CookieFilter {
    /// Match cookies visible to this host: exact host cookies plus
    /// parent-domain cookies (`.example.com` matches `sub.example.com`).
    pub domain: Option<String>,
    /// Exact cookie name.
    pub name: Option<String>,
}

impl CookieFilter {
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Domain-match per cookie rules: the record's (dot-stripped)
    /// domain equals the filter host or is a parent of it.
    pub fn matches(&self, record: &CookieRecord) -> bool {
        if let Some(name) = &self.name {
            if record.name != *name {
                return false;
            }
        }
        if let Some(domain) = &self.domain {
            let host = domain.trim_start_matches('.');
            let record_host = record.host();
            let parent_match = host
                .strip_suffix(record_host)
                .is_some_and(|prefix| prefix.ends_with('.'));
            if record_host != host && !parent_match {
                return false;
            }
        }
        true
    }
}

/// Narrow interface to the host cookie store.
pub trait CookieStore {
    /// All cookies matching the filter, sorted by identity.
    fn get_all(&self, filter: &CookieFilter) -> Result<Vec<CookieRecord>>;

    /// Insert or overwrite a cookie; returns the stored (normalized)
    /// record.
    fn set(&mut self, record: &CookieRecord) -> Result<CookieRecord>;

    /// Remove a cookie by identity.
    fn remove(&mut self, identity: &CookieIdentity) -> Result<()>;
}

/// Outcome of a multi-item operation.  Partial success is expected;
/// the caller reports "applied N, failed M" and moves on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub applied: usize,
    pub failed: usize,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.applied + self.failed
    }
}

/// Apply an edit, sequencing removal first when the identity changed.
///
/// Without the removal, editing a cookie's name/domain/path would
/// leave the old cookie behind as a duplicate.
pub fn apply_edit<S: CookieStore + ?Sized>(
    store: &mut S,
    old: &CookieRecord,
    new: &CookieRecord,
) -> Result<CookieRecord> {
    if old.identity() != new.identity() {
        store.remove(&old.identity())?;
    }
    store.set(new)
}

/// Set every record, counting per-item failures.
pub fn import_records<S: CookieStore + ?Sized>(
    store: &mut S,
    records: &[CookieRecord],
) -> (BatchOutcome, Vec<CookieRecord>) {
    let mut outcome = BatchOutcome::default();
    let mut applied = Vec::new();

    for record in records {
        match store.set(record) {
            Ok(stored) => {
                outcome.applied += 1;
                applied.push(stored);
            }
            Err(_) => outcome.failed += 1,
        }
    }

    (outcome, applied)
}

/// Remove every cookie matching the filter, counting failures.
///
/// Returns the removed records so the caller can build a history entry.
pub fn remove_matching<S: CookieStore + ?Sized>(
    store: &mut S,
    filter: &CookieFilter,
) -> Result<(BatchOutcome, Vec<CookieRecord>)> {
    let matches = store.get_all(filter)?;

    let mut outcome = BatchOutcome::default();
    let mut removed = Vec::new();

    for record in matches {
        match store.remove(&record.identity()) {
            Ok(()) => {
                outcome.applied += 1;
                removed.push(record);
            }
            Err(_) => outcome.failed += 1,
        }
    }

    Ok((outcome, removed))
}
