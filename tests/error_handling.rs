//! Error handling and edge case tests.

use fs2::FileExt;
use n400_companion::{
    Collection, Document, ErrorKind, LoadState, RecordKey, RecordStore, Repository, StoreConfig,
    StoreError, TimelineEvent, Tracker,
};
use serde_json::json;
use std::fs::{self, File};
use tempfile::TempDir;

fn config(dir: &TempDir) -> StoreConfig {
    StoreConfig::at(dir.path().join("store"))
}

/// Replace the collections directory with a plain file so every write fails.
fn break_collections(dir: &TempDir) {
    let collections = dir.path().join("store").join("collections");
    fs::remove_dir_all(&collections).unwrap();
    fs::write(&collections, b"not a directory").unwrap();
}

// --- Idempotent Deletes ---

#[test]
fn test_delete_missing_event_twice() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::open(config(&dir)).unwrap();
    repo.save_event(&TimelineEvent::new("e1", "2020-01-01", "travel", "Trip"))
        .unwrap();

    repo.delete_event("ghost").unwrap();
    repo.delete_event("ghost").unwrap();
    assert_eq!(repo.events().len(), 1);
}

#[test]
fn test_delete_missing_document_twice() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::open(config(&dir)).unwrap();
    repo.load().unwrap();
    let before = repo.documents();

    repo.delete_document("ghost").unwrap();
    repo.delete_document("ghost").unwrap();
    assert_eq!(repo.documents(), before);
}

#[test]
fn test_store_delete_absent_key() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::open(config(&dir)).unwrap();

    store
        .delete(Collection::Notes, &RecordKey::from("nothing"))
        .unwrap();
    assert!(store.get_all(Collection::Notes).is_empty());
}

// --- Storage Failures ---

#[test]
fn test_locked_store() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("store");
    fs::create_dir_all(&root).unwrap();
    let holder = File::create(root.join("LOCK")).unwrap();
    holder.try_lock_exclusive().unwrap();

    let err = RecordStore::open(config(&dir)).err().unwrap();
    assert!(matches!(err, StoreError::Locked));
    assert_eq!(err.kind(), ErrorKind::StorageUnavailable);

    let tracker = Tracker::open(config(&dir));
    assert!(matches!(tracker.state(), LoadState::Error(_)));
    assert_eq!(tracker.documents().len(), 12);
}

#[test]
fn test_failed_write_leaves_cache_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut tracker = Tracker::open(config(&dir));
    tracker.toggle_mastery(1).unwrap();
    let before = tracker.data().clone();

    break_collections(&dir);

    let err = tracker.toggle_mastery(2).unwrap_err();
    assert!(err.is_storage_unavailable());
    assert!(tracker
        .save_event(TimelineEvent::new("e1", "2020-01-01", "travel", "Trip"))
        .is_err());
    assert!(tracker.advance_document("d1").is_err());
    assert_eq!(tracker.data(), &before);
}

#[test]
fn test_failed_write_leaves_store_unchanged() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::open(config(&dir)).unwrap();
    store.put(Collection::Events, json!({"id": "e1"})).unwrap();

    break_collections(&dir);

    assert!(store.replace_all(Collection::Events, vec![json!({"id": "e2"})]).is_err());
    assert!(store.clear_all().is_err());
    assert_eq!(store.get_all(Collection::Events), vec![json!({"id": "e1"})]);
}

/// Block writes to one collection by occupying its temporary file path.
fn block_collection(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let blocker = dir
        .path()
        .join("store")
        .join("collections")
        .join(format!("{name}.tmp"));
    fs::create_dir(&blocker).unwrap();
    blocker
}

#[test]
fn test_failed_clear_all_keeps_one_generation() {
    // File write order varies between runs
    for _ in 0..10 {
        let dir = TempDir::new().unwrap();

        {
            let store = RecordStore::open(config(&dir)).unwrap();
            store.put(Collection::Events, json!({"id": "e1"})).unwrap();
            store
                .put(Collection::Notes, json!({"id": "q1", "content": "x"}))
                .unwrap();
            store
                .put_keyed(Collection::Settings, RecordKey::from("user"), json!({"name": "Jane"}))
                .unwrap();

            block_collection(&dir, "settings");
            assert!(store.clear_all().is_err());

            assert_eq!(store.len(Collection::Events), 1);
            assert_eq!(store.len(Collection::Notes), 1);
            assert_eq!(store.len(Collection::Settings), 1);
            assert!(!store.wal().has_pending().unwrap());
        }

        let store = RecordStore::open(config(&dir)).unwrap();
        assert_eq!(store.len(Collection::Events), 1);
        assert_eq!(store.len(Collection::Notes), 1);
        assert_eq!(store.len(Collection::Settings), 1);
    }
}

#[test]
fn test_failed_reset_keeps_tracker_and_disk_in_step() {
    let dir = TempDir::new().unwrap();

    {
        let mut tracker = Tracker::open(config(&dir));
        tracker
            .save_event(TimelineEvent::new("e1", "2020-01-01", "travel", "Trip"))
            .unwrap();
        tracker.toggle_mastery(7).unwrap();
        let before = tracker.data().clone();

        let blocker = block_collection(&dir, "mastery");
        assert!(tracker.reset_all().is_err());
        assert_eq!(tracker.data(), &before);

        fs::remove_dir(&blocker).unwrap();
        tracker.update_note("q1", "still writable").unwrap();
    }

    let reopened = Tracker::open(config(&dir));
    assert_eq!(reopened.events().len(), 1);
    assert!(reopened.mastery().is_mastered(7));
    assert_eq!(reopened.documents().len(), 12);
    assert_eq!(reopened.note("q1"), Some("still writable"));
}

#[test]
fn test_open_without_create() {
    let dir = TempDir::new().unwrap();
    let result = RecordStore::open(StoreConfig {
        create_if_missing: false,
        ..config(&dir)
    });
    assert!(matches!(result, Err(StoreError::NotInitialized)));
}

#[test]
fn test_corrupt_collection_file() {
    let dir = TempDir::new().unwrap();
    {
        let store = RecordStore::open(config(&dir)).unwrap();
        store.put(Collection::Events, json!({"id": "e1"})).unwrap();
    }

    let path = dir.path().join("store").join("collections").join("events.col");
    let mut bytes = fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&path, bytes).unwrap();

    let tracker = Tracker::open(config(&dir));
    assert!(matches!(tracker.state(), LoadState::Error(_)));
    assert!(!tracker.is_persistent());
}

// --- Invalid Operations ---

#[test]
fn test_nesting_rejected() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::open(config(&dir)).unwrap();
    repo.load().unwrap();

    repo.save_document(&Document::custom("c1", "Child", false).with_parent("d1"))
        .unwrap();

    let grandchild = Document::custom("c2", "Grandchild", false).with_parent("c1");
    let err = repo.save_document(&grandchild).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);

    let mut parent = repo.document("d1").unwrap();
    parent.parent_id = Some("d2".into());
    assert!(repo.save_document(&parent).is_err());

    let dangling = Document::custom("c3", "Orphan", false).with_parent("nope");
    assert!(repo.save_document(&dangling).is_err());
}

#[test]
fn test_user_messages_are_plain() {
    let errors = [
        StoreError::Locked,
        StoreError::Corruption("crc mismatch at offset 4096".into()),
        StoreError::MalformedImport("expected value at line 1 column 1".into()),
    ];
    for err in errors {
        let message = err.user_message();
        assert!(!message.contains("offset"));
        assert!(!message.contains("line 1"));
    }
}
