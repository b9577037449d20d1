//! Bounded undo/redo history of cookie mutations.
//!
//! Two stacks: `undo` holds recorded entries (oldest evicted first when
//! the cap is hit), `redo` holds entries travelling back after an undo.
//! Recording anything new clears `redo` — history is linear, it never
//! branches.  Each entry's cookie arrays are themselves capped, oldest
//! truncated first.
//!
//! This component never errors: missing history is `None`/`false`.  It
//! also does not know how to invert an operation — `undo()` hands the
//! entry back and the session applies the inverse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cookie::CookieRecord;

/// Default cap on the number of entries kept per stack.
pub const DEFAULT_MAX_ENTRIES: usize = 30;

/// Default cap on the number of cookies stored in a single entry.
pub const DEFAULT_MAX_COOKIES_PER_ENTRY: usize = 30;

/// What kind of mutation an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    Edit,
    Delete,
    DeleteAll,
    Create,
    Import,
    LoadProfile,
}

impl HistoryKind {
    /// Short label for table output and audit details.
    pub fn label(self) -> &'static str {
        match self {
            HistoryKind::Edit => "edit",
            HistoryKind::Delete => "delete",
            HistoryKind::DeleteAll => "delete-all",
            HistoryKind::Create => "create",
            HistoryKind::Import => "import",
            HistoryKind::LoadProfile => "load-profile",
        }
    }
}

/// One recorded mutation with before/after snapshots.
///
/// `cookies` is the before-state (what undo restores); `new_cookies`
/// is the after-state where one exists (edits, profile loads).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub kind: HistoryKind,
    pub timestamp: DateTime<Utc>,
    pub domain: String,
    pub cookies: Vec<CookieRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_cookies: Option<Vec<CookieRecord>>,
}

impl HistoryEntry {
    pub fn new(kind: HistoryKind, domain: impl Into<String>, cookies: Vec<CookieRecord>) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
            domain: domain.into(),
            cookies,
            new_cookies: None,
        }
    }

    pub fn with_new_cookies(mut self, new_cookies: Vec<CookieRecord>) -> Self {
        self.new_cookies = Some(new_cookies);
        self
    }
}

/// Snapshot of what the stacks can currently do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryStatus {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Listener invoked with the new status after every state change.
pub type ChangeListener = Box<dyn FnMut(HistoryStatus)>;

/// The bounded undo/redo stack pair.
#[derive(Serialize, Deserialize)]
pub struct HistoryStack {
    max_entries: usize,
    max_cookies_per_entry: usize,
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,

    #[serde(skip)]
    listeners: Vec<ChangeListener>,
}

impl std::fmt::Debug for HistoryStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStack")
            .field("max_entries", &self.max_entries)
            .field("max_cookies_per_entry", &self.max_cookies_per_entry)
            .field("undo", &self.undo.len())
            .field("redo", &self.redo.len())
            .finish()
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_MAX_COOKIES_PER_ENTRY)
    }
}

impl HistoryStack {
    pub fn new(max_entries: usize, max_cookies_per_entry: usize) -> Self {
        Self {
            max_entries: max_entries.max(1),
            max_cookies_per_entry: max_cookies_per_entry.max(1),
            undo: Vec::new(),
            redo: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Register a change listener.  It fires after every `record`,
    /// `undo`, `redo`, and `clear`.
    pub fn on_change(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    /// Record a new entry.  Clears the redo stack and evicts the
    /// oldest undo entry when over the cap.
    pub fn record(&mut self, mut entry: HistoryEntry) {
        Self::truncate_entry(&mut entry, self.max_cookies_per_entry);

        self.undo.push(entry);
        if self.undo.len() > self.max_entries {
            let excess = self.undo.len() - self.max_entries;
            self.undo.drain(..excess);
        }

        self.redo.clear();
        self.notify();
    }

    /// Pop the most recent entry for the caller to invert.
    ///
    /// Returns `None` (no-op) when there is nothing to undo.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        let entry = self.undo.pop()?;
        self.redo.push(entry.clone());
        self.notify();
        Some(entry)
    }

    /// Move the most recently undone entry back for re-application.
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        let entry = self.redo.pop()?;
        self.undo.push(entry.clone());
        self.notify();
        Some(entry)
    }

    /// Empty both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.notify();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Entries awaiting undo, oldest first (for display).
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.undo
    }

    /// Re-apply the caps after deserializing from storage, so a
    /// hand-edited file cannot grow the stacks past their bounds.
    pub fn enforce_caps(&mut self) {
        if self.undo.len() > self.max_entries {
            let excess = self.undo.len() - self.max_entries;
            self.undo.drain(..excess);
        }
        self.redo.truncate(self.max_entries);
        for entry in self.undo.iter_mut().chain(self.redo.iter_mut()) {
            Self::truncate_entry(entry, self.max_cookies_per_entry);
        }
    }

    fn truncate_entry(entry: &mut HistoryEntry, cap: usize) {
        if entry.cookies.len() > cap {
            let excess = entry.cookies.len() - cap;
            entry.cookies.drain(..excess);
        }
        if let Some(new_cookies) = entry.new_cookies.as_mut() {
            if new_cookies.len() > cap {
                let excess = new_cookies.len() - cap;
                new_cookies.drain(..excess);
            }
        }
    }

    fn notify(&mut self) {
        let status = HistoryStatus {
            can_undo: !self.undo.is_empty(),
            can_redo: !self.redo.is_empty(),
        };
        for listener in &mut self.listeners {
            listener(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::{CookieRecord, SameSite};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn cookie(name: &str) -> CookieRecord {
        CookieRecord::new(
            name, "v", "example.com", "/", false, false,
            SameSite::Lax, true, None,
        )
    }

    fn entry(kind: HistoryKind) -> HistoryEntry {
        HistoryEntry::new(kind, "example.com", vec![cookie("sid")])
    }

    #[test]
    fn record_then_undo_then_redo() {
        let mut stack = HistoryStack::default();
        stack.record(entry(HistoryKind::Create));

        assert!(stack.can_undo());
        assert!(!stack.can_redo());

        let undone = stack.undo().unwrap();
        assert_eq!(undone.kind, HistoryKind::Create);
        assert!(!stack.can_undo());
        assert!(stack.can_redo());

        let redone = stack.redo().unwrap();
        assert_eq!(redone.kind, HistoryKind::Create);
        assert!(stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn undo_redo_restore_stack_contents() {
        let mut stack = HistoryStack::default();
        stack.record(entry(HistoryKind::Create));
        stack.record(entry(HistoryKind::Edit));

        let before: Vec<HistoryKind> = stack.entries().iter().map(|e| e.kind).collect();
        stack.undo().unwrap();
        stack.redo().unwrap();
        let after: Vec<HistoryKind> = stack.entries().iter().map(|e| e.kind).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn empty_stack_is_a_noop() {
        let mut stack = HistoryStack::default();
        assert!(stack.undo().is_none());
        assert!(stack.redo().is_none());
    }

    #[test]
    fn record_clears_redo() {
        let mut stack = HistoryStack::default();
        stack.record(entry(HistoryKind::Create));
        stack.undo().unwrap();
        assert!(stack.can_redo());

        stack.record(entry(HistoryKind::Delete));
        assert!(!stack.can_redo(), "recording must clear the redo stack");
    }

    #[test]
    fn oldest_entries_evicted_past_cap() {
        let mut stack = HistoryStack::new(30, 30);
        for i in 0..35 {
            let mut e = entry(HistoryKind::Create);
            e.domain = format!("site{i}.com");
            stack.record(e);
        }

        assert_eq!(stack.entries().len(), 30);
        // The oldest 5 are gone; the survivor at the bottom is #5.
        assert_eq!(stack.entries()[0].domain, "site5.com");
        assert_eq!(stack.entries()[29].domain, "site34.com");
    }

    #[test]
    fn oversized_entry_truncated_oldest_first() {
        let mut stack = HistoryStack::new(30, 30);
        let cookies: Vec<CookieRecord> = (0..40).map(|i| cookie(&format!("c{i}"))).collect();
        stack.record(HistoryEntry::new(HistoryKind::Import, "example.com", cookies));

        let recorded = &stack.entries()[0];
        assert_eq!(recorded.cookies.len(), 30);
        // Oldest (front) truncated away.
        assert_eq!(recorded.cookies[0].name, "c10");
        assert_eq!(recorded.cookies[29].name, "c39");
    }

    #[test]
    fn clear_empties_both_stacks() {
        let mut stack = HistoryStack::default();
        stack.record(entry(HistoryKind::Create));
        stack.record(entry(HistoryKind::Edit));
        stack.undo().unwrap();

        stack.clear();
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn listeners_see_every_transition() {
        let seen: Rc<RefCell<Vec<HistoryStatus>>> = Rc::default();
        let sink = Rc::clone(&seen);

        let mut stack = HistoryStack::default();
        stack.on_change(Box::new(move |status| sink.borrow_mut().push(status)));

        stack.record(entry(HistoryKind::Create));
        stack.undo().unwrap();
        stack.redo().unwrap();
        stack.clear();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], HistoryStatus { can_undo: true, can_redo: false });
        assert_eq!(seen[1], HistoryStatus { can_undo: false, can_redo: true });
        assert_eq!(seen[2], HistoryStatus { can_undo: true, can_redo: false });
        assert_eq!(seen[3], HistoryStatus { can_undo: false, can_redo: false });
    }

    #[test]
    fn enforce_caps_after_deserialize() {
        // Simulate a hand-grown storage file: small caps, oversized stacks.
        let oversized: Vec<serde_json::Value> = (0..5)
            .map(|i| {
                let cookies: Vec<CookieRecord> =
                    (0..4).map(|j| cookie(&format!("c{i}-{j}"))).collect();
                serde_json::to_value(HistoryEntry::new(
                    HistoryKind::Import,
                    format!("site{i}.com"),
                    cookies,
                ))
                .unwrap()
            })
            .collect();

        let json = serde_json::json!({
            "max_entries": 3,
            "max_cookies_per_entry": 2,
            "undo": oversized,
            "redo": [],
        });

        let mut stack: HistoryStack = serde_json::from_value(json).unwrap();
        stack.enforce_caps();

        assert_eq!(stack.entries().len(), 3);
        // Oldest entries evicted first.
        assert_eq!(stack.entries()[0].domain, "site2.com");
        assert!(stack.entries().iter().all(|e| e.cookies.len() <= 2));
    }

    #[test]
    fn serde_roundtrip_preserves_entries() {
        let mut stack = HistoryStack::default();
        stack.record(entry(HistoryKind::Create));
        stack.record(
            entry(HistoryKind::Edit).with_new_cookies(vec![cookie("after")]),
        );

        let json = serde_json::to_string(&stack).unwrap();
        let back: HistoryStack = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries(), stack.entries());
        assert_eq!(back.status(), stack.status());
    }
}
