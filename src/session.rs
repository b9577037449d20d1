//! Session orchestration.
//!
//! A `Session` is the single owner of all mutable state: the cookie
//! store, the profile store, and the history stack.  Every mutating
//! operation flows through here so the bookkeeping always happens in
//! the same order: apply the change, record history, refresh the
//! profile-modified flag, persist.
//!
//! The session also knows how to invert recorded operations — the
//! history stack itself only stores entries.  Batch inversions report
//! partial failures in aggregate, like every other batch here.

use std::collections::BTreeMap;

use crate::cookie::CookieRecord;
use crate::errors::{CookieDeckError, Result};
use crate::history::{HistoryEntry, HistoryKind, HistoryStack, HistoryStatus};
use crate::profile::{ProfileMeta, ProfileStore};
use crate::storage::Storage;
use crate::store::{
    apply_edit, import_records, remove_matching, BatchOutcome, CookieFilter, CookieStore,
};

/// Storage key for the serialized profile store.
const PROFILES_KEY: &str = "profiles";

/// Storage key for the serialized history stack.
const HISTORY_KEY: &str = "history";

/// Profile status reported to the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStatus {
    pub last_loaded: Option<String>,
    pub modified: bool,
    pub profile_count: usize,
}

/// The controller owning cookies, profiles, and history for one data
/// directory.
pub struct Session<C: CookieStore, S: Storage> {
    cookies: C,
    storage: S,
    profiles: ProfileStore,
    history: HistoryStack,
}

impl<C: CookieStore, S: Storage> Session<C, S> {
    /// Open a session, restoring profiles and history from storage.
    pub fn open(
        cookies: C,
        storage: S,
        history_max_entries: usize,
        history_max_cookies: usize,
    ) -> Result<Self> {
        let profiles = match storage.get(PROFILES_KEY)? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| CookieDeckError::StoreCorrupted(format!("profiles: {e}")))?,
            None => ProfileStore::new(),
        };

        let mut history = match storage.get(HISTORY_KEY)? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| CookieDeckError::StoreCorrupted(format!("history: {e}")))?,
            None => HistoryStack::new(history_max_entries, history_max_cookies),
        };
        history.enforce_caps();

        Ok(Self {
            cookies,
            storage,
            profiles,
            history,
        })
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Cookies visible to `domain` (all cookies when `None`).
    pub fn list(&self, domain: Option<&str>) -> Result<Vec<CookieRecord>> {
        let filter = match domain {
            Some(d) => CookieFilter::for_domain(d),
            None => CookieFilter::default(),
        };
        self.cookies.get_all(&filter)
    }

    /// A single cookie by domain + name.
    pub fn get(&self, domain: &str, name: &str) -> Result<CookieRecord> {
        let filter = CookieFilter::for_domain(domain).with_name(name);
        self.cookies
            .get_all(&filter)?
            .into_iter()
            .next()
            .ok_or_else(|| CookieDeckError::CookieNotFound {
                name: name.to_string(),
                domain: domain.to_string(),
            })
    }

    pub fn history_status(&self) -> HistoryStatus {
        self.history.status()
    }

    pub fn history_entries(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    // ------------------------------------------------------------------
    // Cookie mutations
    // ------------------------------------------------------------------

    /// Create or overwrite a single cookie.
    pub fn add(&mut self, record: &CookieRecord) -> Result<CookieRecord> {
        let stored = self.cookies.set(record)?;

        self.history.record(HistoryEntry::new(
            HistoryKind::Create,
            stored.host().to_string(),
            vec![stored.clone()],
        ));

        self.after_mutation(&stored.host().to_string())?;
        Ok(stored)
    }

    /// Edit an existing cookie, sequencing removal first when the
    /// identity key changed.
    pub fn edit(&mut self, old: &CookieRecord, new: &CookieRecord) -> Result<CookieRecord> {
        let stored = apply_edit(&mut self.cookies, old, new)?;

        self.history.record(
            HistoryEntry::new(
                HistoryKind::Edit,
                stored.host().to_string(),
                vec![old.clone()],
            )
            .with_new_cookies(vec![stored.clone()]),
        );

        self.after_mutation(&stored.host().to_string())?;
        Ok(stored)
    }

    /// Delete one cookie by domain + name (+ optional path to pick
    /// between same-named cookies).
    pub fn delete(&mut self, domain: &str, name: &str, path: Option<&str>) -> Result<CookieRecord> {
        let filter = CookieFilter::for_domain(domain).with_name(name);
        let matches = self.cookies.get_all(&filter)?;

        let target = matches
            .into_iter()
            .find(|c| path.map_or(true, |p| c.path == p))
            .ok_or_else(|| CookieDeckError::CookieNotFound {
                name: name.to_string(),
                domain: domain.to_string(),
            })?;

        self.cookies.remove(&target.identity())?;

        self.history.record(HistoryEntry::new(
            HistoryKind::Delete,
            domain.to_string(),
            vec![target.clone()],
        ));

        self.after_mutation(domain)?;
        Ok(target)
    }

    /// Delete every cookie visible to `domain`, reporting partial
    /// failures in aggregate.
    pub fn delete_all(&mut self, domain: &str) -> Result<BatchOutcome> {
        let (outcome, removed) =
            remove_matching(&mut self.cookies, &CookieFilter::for_domain(domain))?;

        if !removed.is_empty() {
            self.history.record(HistoryEntry::new(
                HistoryKind::DeleteAll,
                domain.to_string(),
                removed,
            ));
        }

        self.after_mutation(domain)?;
        Ok(outcome)
    }

    /// Import a batch of records, reporting partial failures in
    /// aggregate.
    pub fn import(&mut self, records: &[CookieRecord], domain: &str) -> Result<BatchOutcome> {
        let (outcome, applied) = import_records(&mut self.cookies, records);

        if !applied.is_empty() {
            self.history.record(HistoryEntry::new(
                HistoryKind::Import,
                domain.to_string(),
                applied,
            ));
        }

        self.after_mutation(domain)?;
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Profiles
    // ------------------------------------------------------------------

    /// Save the live cookie set as a named profile.  The saved profile
    /// becomes the loaded one (live set matches it by construction).
    pub fn save_profile(&mut self, domain: &str, name: &str, force: bool) -> Result<usize> {
        let live = self.list(Some(domain))?;
        self.profiles.save(domain, name, live.clone(), force)?;
        self.profiles.meta_mut(domain).mark_loaded(name, &live);
        self.persist()?;
        Ok(live.len())
    }

    /// Replace the domain's live cookies with a saved profile.
    pub fn load_profile(&mut self, domain: &str, name: &str) -> Result<BatchOutcome> {
        let target: Vec<CookieRecord> = self.profiles.get(domain, name)?.to_vec();

        let previous = self.list(Some(domain))?;
        let (_, _removed) = remove_matching(&mut self.cookies, &CookieFilter::for_domain(domain))?;
        let (outcome, applied) = import_records(&mut self.cookies, &target);

        self.history.record(
            HistoryEntry::new(HistoryKind::LoadProfile, domain.to_string(), previous)
                .with_new_cookies(applied),
        );

        let live = self.list(Some(domain))?;
        self.profiles.meta_mut(domain).mark_loaded(name, &live);
        self.persist()?;
        Ok(outcome)
    }

    pub fn rename_profile(&mut self, domain: &str, from: &str, to: &str) -> Result<()> {
        self.profiles.rename(domain, from, to)?;
        self.persist()
    }

    pub fn delete_profile(&mut self, domain: &str, name: &str) -> Result<()> {
        self.profiles.delete(domain, name)?;
        self.persist()
    }

    pub fn list_profiles(&self, domain: &str) -> Vec<String> {
        self.profiles
            .list(domain)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// All profiles for a domain (for `share --profiles`).
    pub fn profiles_for_domain(&self, domain: &str) -> BTreeMap<String, Vec<CookieRecord>> {
        self.profiles.all_for_domain(domain)
    }

    /// Import a name → cookies map (from a `profiles` share payload).
    pub fn import_profiles(
        &mut self,
        domain: &str,
        profiles: BTreeMap<String, Vec<CookieRecord>>,
        force: bool,
    ) -> Result<usize> {
        let mut imported = 0;
        for (name, cookies) in profiles {
            match self.profiles.save(domain, &name, cookies, force) {
                Ok(()) => imported += 1,
                Err(CookieDeckError::ProfileAlreadyExists(_)) if !force => {}
                Err(e) => return Err(e),
            }
        }
        self.persist()?;
        Ok(imported)
    }

    /// Current tracking status, with the modified flag recomputed
    /// against the live set.
    pub fn profile_status(&mut self, domain: &str) -> Result<ProfileStatus> {
        let live = self.list(Some(domain))?;
        let meta: &mut ProfileMeta = self.profiles.meta_mut(domain);
        let modified = meta.refresh(&live);
        let last_loaded = meta.last_loaded.clone();

        Ok(ProfileStatus {
            last_loaded,
            modified,
            profile_count: self.profiles.list(domain).len(),
        })
    }

    // ------------------------------------------------------------------
    // Undo / redo
    // ------------------------------------------------------------------

    /// Undo the most recent mutation.
    ///
    /// Returns the inverted entry's kind and the aggregate outcome of
    /// re-applying the before-state, or `None` when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> Result<Option<(HistoryKind, BatchOutcome)>> {
        let Some(entry) = self.history.undo() else {
            return Ok(None);
        };

        let outcome = self.apply_inverse(&entry);
        self.after_mutation(&entry.domain)?;
        Ok(Some((entry.kind, outcome)))
    }

    /// Re-apply the most recently undone mutation.
    pub fn redo(&mut self) -> Result<Option<(HistoryKind, BatchOutcome)>> {
        let Some(entry) = self.history.redo() else {
            return Ok(None);
        };

        let outcome = self.apply_forward(&entry);
        self.after_mutation(&entry.domain)?;
        Ok(Some((entry.kind, outcome)))
    }

    /// Drop all history.
    pub fn clear_history(&mut self) -> Result<()> {
        self.history.clear();
        self.persist()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn apply_inverse(&mut self, entry: &HistoryEntry) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        match entry.kind {
            // Creation and import are inverted by removing what was added.
            HistoryKind::Create | HistoryKind::Import => {
                for cookie in &entry.cookies {
                    Self::count(self.cookies.remove(&cookie.identity()), &mut outcome);
                }
            }
            // Deletions are inverted by restoring the before-state.
            HistoryKind::Delete | HistoryKind::DeleteAll => {
                for cookie in &entry.cookies {
                    Self::count(self.cookies.set(cookie).map(|_| ()), &mut outcome);
                }
            }
            HistoryKind::Edit => {
                match (entry.new_cookies.as_deref(), entry.cookies.first()) {
                    (Some([new]), Some(old)) => {
                        Self::count(
                            apply_edit(&mut self.cookies, new, old).map(|_| ()),
                            &mut outcome,
                        );
                    }
                    _ => outcome.failed += 1,
                }
            }
            // A profile load replaced the domain's set; put the old set back.
            HistoryKind::LoadProfile => {
                if let Some(new_cookies) = &entry.new_cookies {
                    for cookie in new_cookies {
                        let _ = self.cookies.remove(&cookie.identity());
                    }
                }
                for cookie in &entry.cookies {
                    Self::count(self.cookies.set(cookie).map(|_| ()), &mut outcome);
                }
            }
        }

        outcome
    }

    fn apply_forward(&mut self, entry: &HistoryEntry) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        match entry.kind {
            HistoryKind::Create | HistoryKind::Import => {
                for cookie in &entry.cookies {
                    Self::count(self.cookies.set(cookie).map(|_| ()), &mut outcome);
                }
            }
            HistoryKind::Delete | HistoryKind::DeleteAll => {
                for cookie in &entry.cookies {
                    Self::count(self.cookies.remove(&cookie.identity()), &mut outcome);
                }
            }
            HistoryKind::Edit => {
                match (entry.cookies.first(), entry.new_cookies.as_deref()) {
                    (Some(old), Some([new])) => {
                        Self::count(
                            apply_edit(&mut self.cookies, old, new).map(|_| ()),
                            &mut outcome,
                        );
                    }
                    _ => outcome.failed += 1,
                }
            }
            HistoryKind::LoadProfile => {
                for cookie in &entry.cookies {
                    let _ = self.cookies.remove(&cookie.identity());
                }
                if let Some(new_cookies) = &entry.new_cookies {
                    for cookie in new_cookies {
                        Self::count(self.cookies.set(cookie).map(|_| ()), &mut outcome);
                    }
                }
            }
        }

        outcome
    }

    fn count(result: Result<()>, outcome: &mut BatchOutcome) {
        match result {
            Ok(()) => outcome.applied += 1,
            Err(_) => outcome.failed += 1,
        }
    }

    /// Post-mutation bookkeeping: refresh the modified flag for the
    /// touched domain and persist profiles + history.
    fn after_mutation(&mut self, domain: &str) -> Result<()> {
        let live = self.list(Some(domain))?;
        self.profiles.meta_mut(domain).refresh(&live);
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        let profiles = serde_json::to_value(&self.profiles)
            .map_err(|e| CookieDeckError::SerializationError(format!("profiles: {e}")))?;
        self.storage.set(PROFILES_KEY, profiles)?;

        let history = serde_json::to_value(&self.history)
            .map_err(|e| CookieDeckError::SerializationError(format!("history: {e}")))?;
        self.storage.set(HISTORY_KEY, history)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::SameSite;
    use crate::storage::MemoryStorage;
    use crate::store::MemoryCookieStore;

    fn session() -> Session<MemoryCookieStore, MemoryStorage> {
        Session::open(MemoryCookieStore::new(), MemoryStorage::new(), 30, 30).unwrap()
    }

    fn cookie(name: &str, value: &str) -> CookieRecord {
        CookieRecord::new(
            name, value, "example.com", "/", false, false,
            SameSite::Lax, true, None,
        )
    }

    #[test]
    fn add_then_undo_removes_the_cookie() {
        let mut s = session();
        s.add(&cookie("sid", "v")).unwrap();
        assert_eq!(s.list(Some("example.com")).unwrap().len(), 1);

        let (kind, outcome) = s.undo().unwrap().unwrap();
        assert_eq!(kind, HistoryKind::Create);
        assert_eq!(outcome.applied, 1);
        assert!(s.list(Some("example.com")).unwrap().is_empty());

        let (kind, _) = s.redo().unwrap().unwrap();
        assert_eq!(kind, HistoryKind::Create);
        assert_eq!(s.list(Some("example.com")).unwrap().len(), 1);
    }

    #[test]
    fn edit_changing_name_leaves_single_cookie_and_undoes_cleanly() {
        let mut s = session();
        let old = s.add(&cookie("sid", "v")).unwrap();

        let mut new = old.clone();
        new.name = "session".to_string();
        s.edit(&old, &new).unwrap();

        let live = s.list(Some("example.com")).unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].name, "session");

        s.undo().unwrap().unwrap();
        let live = s.list(Some("example.com")).unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].name, "sid");
    }

    #[test]
    fn delete_then_undo_restores() {
        let mut s = session();
        s.add(&cookie("sid", "v")).unwrap();
        s.delete("example.com", "sid", None).unwrap();
        assert!(s.list(Some("example.com")).unwrap().is_empty());

        s.undo().unwrap().unwrap();
        assert_eq!(s.list(Some("example.com")).unwrap().len(), 1);
    }

    #[test]
    fn delete_all_reports_aggregate_and_undoes() {
        let mut s = session();
        s.add(&cookie("a", "1")).unwrap();
        s.add(&cookie("b", "2")).unwrap();

        let outcome = s.delete_all("example.com").unwrap();
        assert_eq!(outcome, BatchOutcome { applied: 2, failed: 0 });

        let (kind, outcome) = s.undo().unwrap().unwrap();
        assert_eq!(kind, HistoryKind::DeleteAll);
        assert_eq!(outcome.applied, 2);
        assert_eq!(s.list(Some("example.com")).unwrap().len(), 2);
    }

    #[test]
    fn undo_with_no_history_is_none() {
        let mut s = session();
        assert!(s.undo().unwrap().is_none());
        assert!(s.redo().unwrap().is_none());
    }

    #[test]
    fn profile_roundtrip_and_modified_tracking() {
        let mut s = session();
        s.add(&cookie("sid", "v")).unwrap();
        s.save_profile("example.com", "work", false).unwrap();

        let status = s.profile_status("example.com").unwrap();
        assert_eq!(status.last_loaded.as_deref(), Some("work"));
        assert!(!status.modified);

        // Mutate the live set; status flips to modified.
        s.add(&cookie("extra", "x")).unwrap();
        assert!(s.profile_status("example.com").unwrap().modified);

        // Loading the profile restores the saved set and clears the flag.
        let outcome = s.load_profile("example.com", "work").unwrap();
        assert_eq!(outcome.failed, 0);
        assert!(!s.profile_status("example.com").unwrap().modified);
        let live = s.list(Some("example.com")).unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].name, "sid");
    }

    #[test]
    fn load_profile_undo_restores_previous_live_set() {
        let mut s = session();
        s.add(&cookie("current", "1")).unwrap();
        s.save_profile("example.com", "work", false).unwrap();

        s.delete_all("example.com").unwrap();
        s.add(&cookie("other", "2")).unwrap();

        s.load_profile("example.com", "work").unwrap();
        let live = s.list(Some("example.com")).unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].name, "current");

        let (kind, _) = s.undo().unwrap().unwrap();
        assert_eq!(kind, HistoryKind::LoadProfile);
        let live = s.list(Some("example.com")).unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].name, "other");
    }

    #[test]
    fn state_survives_reopen_through_storage() {
        let mut storage = MemoryStorage::new();

        {
            let mut s =
                Session::open(MemoryCookieStore::new(), &mut storage, 30, 30).unwrap();
            s.add(&cookie("sid", "v")).unwrap();
            s.save_profile("example.com", "work", false).unwrap();
        }

        let mut s = Session::open(MemoryCookieStore::new(), &mut storage, 30, 30).unwrap();
        assert_eq!(s.list_profiles("example.com"), vec!["work"]);
        // History survived too.
        assert!(s.history_status().can_undo);
        let status = s.profile_status("example.com").unwrap();
        assert_eq!(status.last_loaded.as_deref(), Some("work"));
    }

    #[test]
    fn import_profiles_skips_existing_without_force() {
        let mut s = session();
        s.profiles
            .save("example.com", "work", vec![cookie("a", "1")], false)
            .unwrap();

        let mut incoming = BTreeMap::new();
        incoming.insert("work".to_string(), vec![cookie("b", "2")]);
        incoming.insert("fresh".to_string(), vec![cookie("c", "3")]);

        let imported = s.import_profiles("example.com", incoming, false).unwrap();
        assert_eq!(imported, 1);
        // Existing profile untouched.
        assert_eq!(s.profiles.get("example.com", "work").unwrap()[0].name, "a");
    }
}
