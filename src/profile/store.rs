//! Profile collections, keyed by `(domain, profile name)`.
//!
//! `ProfileStore` is the in-memory shape; the session persists it as a
//! whole through the `Storage` boundary after every change.  Profiles
//! survive until explicitly deleted or renamed; a rename migrates the
//! `last_loaded` marker along with the contents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cookie::CookieRecord;
use crate::errors::{CookieDeckError, Result};

use super::tracker::ProfileMeta;

/// Profiles and tracking state for one domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainProfiles {
    /// Profile name → saved cookie list, sorted by name.
    #[serde(default)]
    pub profiles: BTreeMap<String, Vec<CookieRecord>>,

    /// Last-loaded / modified tracking for the domain.
    #[serde(default)]
    pub meta: ProfileMeta,
}

/// All saved profiles, keyed by domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileStore {
    #[serde(default)]
    domains: BTreeMap<String, DomainProfiles>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save (or overwrite, when `force`) a profile.
    pub fn save(
        &mut self,
        domain: &str,
        name: &str,
        cookies: Vec<CookieRecord>,
        force: bool,
    ) -> Result<()> {
        let entry = self.domains.entry(domain.to_string()).or_default();

        if entry.profiles.contains_key(name) && !force {
            return Err(CookieDeckError::ProfileAlreadyExists(name.to_string()));
        }

        let cookies: Vec<CookieRecord> =
            cookies.into_iter().map(CookieRecord::normalized).collect();
        entry.profiles.insert(name.to_string(), cookies);
        Ok(())
    }

    /// Fetch a profile's cookies.
    pub fn get(&self, domain: &str, name: &str) -> Result<&[CookieRecord]> {
        self.domains
            .get(domain)
            .and_then(|d| d.profiles.get(name))
            .map(Vec::as_slice)
            .ok_or_else(|| CookieDeckError::ProfileNotFound(name.to_string()))
    }

    /// List profile names for a domain, sorted.
    pub fn list(&self, domain: &str) -> Vec<&str> {
        self.domains
            .get(domain)
            .map(|d| d.profiles.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// All profiles for a domain as a name → cookies map (for sharing).
    pub fn all_for_domain(&self, domain: &str) -> BTreeMap<String, Vec<CookieRecord>> {
        self.domains
            .get(domain)
            .map(|d| d.profiles.clone())
            .unwrap_or_default()
    }

    /// Rename a profile, migrating the `last_loaded` marker with it.
    ///
    /// The snapshot digest is untouched — contents did not change, so
    /// the modified flag must not flip because of a rename.
    pub fn rename(&mut self, domain: &str, from: &str, to: &str) -> Result<()> {
        let entry = self
            .domains
            .get_mut(domain)
            .ok_or_else(|| CookieDeckError::ProfileNotFound(from.to_string()))?;

        if entry.profiles.contains_key(to) {
            return Err(CookieDeckError::ProfileAlreadyExists(to.to_string()));
        }

        let cookies = entry
            .profiles
            .remove(from)
            .ok_or_else(|| CookieDeckError::ProfileNotFound(from.to_string()))?;
        entry.profiles.insert(to.to_string(), cookies);

        if entry.meta.last_loaded.as_deref() == Some(from) {
            entry.meta.last_loaded = Some(to.to_string());
        }

        Ok(())
    }

    /// Delete a profile.  Deleting the last-loaded profile clears the
    /// loaded marker and its snapshot.
    pub fn delete(&mut self, domain: &str, name: &str) -> Result<()> {
        let entry = self
            .domains
            .get_mut(domain)
            .ok_or_else(|| CookieDeckError::ProfileNotFound(name.to_string()))?;

        if entry.profiles.remove(name).is_none() {
            return Err(CookieDeckError::ProfileNotFound(name.to_string()));
        }

        if entry.meta.last_loaded.as_deref() == Some(name) {
            entry.meta.clear_loaded();
        }

        Ok(())
    }

    /// Tracking state for a domain (default when nothing is saved yet).
    pub fn meta(&self, domain: &str) -> ProfileMeta {
        self.domains
            .get(domain)
            .map(|d| d.meta.clone())
            .unwrap_or_default()
    }

    /// Mutable tracking state, creating the domain entry on demand.
    pub fn meta_mut(&mut self, domain: &str) -> &mut ProfileMeta {
        &mut self.domains.entry(domain.to_string()).or_default().meta
    }

    /// Domains that have at least one profile or tracking state.
    pub fn domains(&self) -> Vec<&str> {
        self.domains.keys().map(String::as_str).collect()
    }
}
