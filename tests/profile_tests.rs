//! Integration tests for profiles: modification tracking and the full
//! save/load/rename/delete lifecycle through a session.

use cookiedeck::cookie::{CookieRecord, SameSite};
use cookiedeck::errors::CookieDeckError;
use cookiedeck::profile::{snapshot, ProfileMeta};
use cookiedeck::session::Session;
use cookiedeck::storage::MemoryStorage;
use cookiedeck::store::MemoryCookieStore;

fn cookie(name: &str, value: &str) -> CookieRecord {
    CookieRecord::new(
        name, value, "example.com", "/", false, false,
        SameSite::Lax, true, None,
    )
}

fn session() -> Session<MemoryCookieStore, MemoryStorage> {
    Session::open(MemoryCookieStore::new(), MemoryStorage::new(), 30, 30)
        .expect("session should open")
}

// ---------------------------------------------------------------------------
// Modification tracker
// ---------------------------------------------------------------------------

#[test]
fn unchanged_set_is_not_modified() {
    let a = cookie("a", "1");
    let b = cookie("b", "2");

    let mut meta = ProfileMeta::default();
    meta.mark_loaded("work", &[a.clone(), b.clone()]);

    assert!(!meta.is_modified(&[a.clone(), b.clone()]));
    // Order must not matter.
    assert!(!meta.is_modified(&[b, a]));
}

#[test]
fn removed_added_and_edited_sets_are_modified() {
    let a = cookie("a", "1");
    let b = cookie("b", "2");

    let mut meta = ProfileMeta::default();
    meta.mark_loaded("work", &[a.clone(), b.clone()]);

    // [A] — removed B.
    assert!(meta.is_modified(&[a.clone()]));
    // [A, B, C] — added C.
    assert!(meta.is_modified(&[a.clone(), b.clone(), cookie("c", "3")]));
    // [A', B] — edited A.
    assert!(meta.is_modified(&[cookie("a", "edited"), b]));
}

#[test]
fn no_loaded_profile_means_never_modified() {
    let meta = ProfileMeta::default();
    assert!(!meta.is_modified(&[cookie("a", "1")]));
    assert!(!meta.is_modified(&[]));
}

#[test]
fn snapshot_digests_are_stable() {
    let set = vec![cookie("a", "1"), cookie("b", "2")];
    assert_eq!(snapshot(&set), snapshot(&set.clone()));
}

// ---------------------------------------------------------------------------
// Session-level lifecycle
// ---------------------------------------------------------------------------

#[test]
fn save_load_and_status() {
    let mut s = session();
    s.add(&cookie("sid", "v1")).expect("add");
    s.add(&cookie("theme", "dark")).expect("add");

    s.save_profile("example.com", "work", false).expect("save");

    let status = s.profile_status("example.com").expect("status");
    assert_eq!(status.last_loaded.as_deref(), Some("work"));
    assert_eq!(status.profile_count, 1);
    assert!(!status.modified);

    // Drift the live set.
    s.delete("example.com", "theme", None).expect("delete");
    assert!(s.profile_status("example.com").expect("status").modified);

    // Reloading the profile restores and clears the flag.
    s.load_profile("example.com", "work").expect("load");
    let status = s.profile_status("example.com").expect("status");
    assert!(!status.modified);
    assert_eq!(s.list(Some("example.com")).expect("list").len(), 2);
}

#[test]
fn rename_migrates_loaded_marker_without_flipping_modified() {
    let mut s = session();
    s.add(&cookie("sid", "v1")).expect("add");
    s.save_profile("example.com", "work", false).expect("save");

    s.rename_profile("example.com", "work", "office").expect("rename");

    let status = s.profile_status("example.com").expect("status");
    assert_eq!(status.last_loaded.as_deref(), Some("office"));
    assert!(!status.modified, "a rename must not look like a modification");

    assert_eq!(s.list_profiles("example.com"), vec!["office"]);
}

#[test]
fn delete_of_loaded_profile_clears_tracking() {
    let mut s = session();
    s.add(&cookie("sid", "v1")).expect("add");
    s.save_profile("example.com", "work", false).expect("save");

    s.delete_profile("example.com", "work").expect("delete");

    let status = s.profile_status("example.com").expect("status");
    assert_eq!(status.last_loaded, None);
    assert!(!status.modified);
    assert_eq!(status.profile_count, 0);
}

#[test]
fn duplicate_save_requires_force() {
    let mut s = session();
    s.add(&cookie("sid", "v1")).expect("add");
    s.save_profile("example.com", "work", false).expect("save");

    let err = s.save_profile("example.com", "work", false);
    assert!(matches!(err, Err(CookieDeckError::ProfileAlreadyExists(_))));

    s.save_profile("example.com", "work", true).expect("force save");
}

#[test]
fn load_missing_profile_errors() {
    let mut s = session();
    let err = s.load_profile("example.com", "ghost");
    assert!(matches!(err, Err(CookieDeckError::ProfileNotFound(_))));
}

#[test]
fn profiles_do_not_leak_across_domains() {
    let mut s = session();
    s.add(&cookie("sid", "v1")).expect("add");
    s.save_profile("example.com", "work", false).expect("save");

    assert!(s.list_profiles("other.org").is_empty());
    let err = s.load_profile("other.org", "work");
    assert!(matches!(err, Err(CookieDeckError::ProfileNotFound(_))));
}
