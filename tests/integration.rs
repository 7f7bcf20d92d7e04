//! Integration tests for the tracker and repository.

use n400_companion::{
    Document, DocumentStatus, LoadState, Repository, StoreConfig, TimelineEvent, Tracker,
    UserSettings,
};
use tempfile::TempDir;

fn config(dir: &TempDir) -> StoreConfig {
    StoreConfig::at(dir.path().join("store"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// --- Realistic Workflow Tests ---

#[test]
fn test_preparation_workflow() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let mut tracker = Tracker::open(config(&dir));
    assert_eq!(tracker.state(), &LoadState::Ready);

    let mut settings = UserSettings::named("Jane Doe");
    settings.interview_date = Some("2027-01-15".into());
    tracker.update_settings(settings).unwrap();

    let mut trip = TimelineEvent::new("e1", "2021-07-01", "travel", "Summer in Portugal");
    trip.end_date = Some("2021-07-20".into());
    trip.linked_document_ids = vec!["d3".into()];
    tracker.save_event(trip).unwrap();
    tracker
        .save_event(TimelineEvent::new("e2", "2023-02-10", "work", "New job"))
        .unwrap();

    for _ in 0..4 {
        tracker.advance_document("d1").unwrap();
    }
    tracker
        .save_document(Document::custom("c1", "Lease agreement", false).with_parent("d9"))
        .unwrap();
    tracker.toggle_mastery(1).unwrap();
    tracker.toggle_mastery(2).unwrap();
    tracker.update_note("q1", "supreme law of the land").unwrap();

    let newest: Vec<&str> = tracker.events_newest_first().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(newest, vec!["e2", "e1"]);

    let progress = tracker.progress();
    assert_eq!(progress.mastered, 2);
    assert_eq!(progress.ready_documents, 1);
    assert_eq!(progress.documents, 13);
    assert_eq!(progress.required_missing, 3);
    assert!(progress.days_until_interview.is_some());

    // Everything is durable
    drop(tracker);
    let reopened = Tracker::open(config(&dir));
    assert_eq!(reopened.settings().name, "Jane Doe");
    assert_eq!(reopened.events().len(), 2);
    assert_eq!(reopened.document("d1").unwrap().status, DocumentStatus::Packed);
    assert_eq!(reopened.document("c1").unwrap().parent_id.as_deref(), Some("d9"));
    assert!(reopened.mastery().is_mastered(2));
    assert_eq!(reopened.note("q1"), Some("supreme law of the land"));
}

#[test]
fn test_export_import_round_trip() {
    init_tracing();
    let source_dir = TempDir::new().unwrap();
    let mut source = Tracker::open(config(&source_dir));

    let mut event = TimelineEvent::new("e1", "2020-01-05", "residence", "Moved to Austin");
    event.description = Some("Lease signed".into());
    event.evidence_link = Some("https://example.com/lease.pdf".into());
    source.save_event(event).unwrap();
    source.advance_document("d6").unwrap();
    source.toggle_mastery(42).unwrap();
    source.update_note("d6", "2019-2023").unwrap();
    source.update_settings(UserSettings::named("Sam")).unwrap();

    let json = n400_companion::snapshot_to_json(&source.export()).unwrap();

    let target_dir = TempDir::new().unwrap();
    let mut target = Tracker::open(config(&target_dir));
    target.reset_all().unwrap();
    let outcome = target.import_json(&json);

    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.applied.len(), 6);
    assert_eq!(target.events(), source.events());
    assert_eq!(target.questions(), source.questions());
    assert_eq!(target.documents(), source.documents());
    assert_eq!(target.mastery(), source.mastery());
    assert_eq!(target.notes(), source.notes());
    assert_eq!(target.settings(), source.settings());
}

#[test]
fn test_seeding_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::open(config(&dir)).unwrap();

    let first = repo.load().unwrap();
    let second = repo.load().unwrap();
    assert_eq!(first.docs.len(), second.docs.len());
    assert_eq!(first.questions.len(), second.questions.len());
    assert_eq!(second.docs.len(), 12);
    assert_eq!(second.questions.len(), 100);
}

#[test]
fn test_seeding_keeps_user_data() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::open(config(&dir)).unwrap();
    repo.save_all_documents(&[Document::custom("mine", "My only doc", true)])
        .unwrap();

    let data = repo.load().unwrap();
    assert_eq!(data.docs.len(), 1);
    assert_eq!(data.docs[0].id, "mine");
}

#[test]
fn test_reset_all_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut tracker = Tracker::open(config(&dir));
    tracker
        .save_event(TimelineEvent::new("e1", "2020-01-01", "travel", "Trip"))
        .unwrap();
    tracker.delete_document("d4").unwrap();
    tracker.update_note("d1", "x").unwrap();

    tracker.reset_all().unwrap();

    assert!(tracker.events().is_empty());
    assert!(tracker.notes().is_empty());
    assert!(tracker.mastery().is_empty());
    assert_eq!(tracker.documents().len(), 12);
    assert!(tracker.repository().unwrap().settings().is_none());
}

#[test]
fn test_status_progression_clamps() {
    let dir = TempDir::new().unwrap();
    let mut tracker = Tracker::open(config(&dir));

    let statuses: Vec<DocumentStatus> = (0..5)
        .map(|_| tracker.advance_document("d2").unwrap().unwrap().status)
        .collect();
    assert_eq!(
        statuses,
        vec![
            DocumentStatus::Found,
            DocumentStatus::Copied,
            DocumentStatus::Uploaded,
            DocumentStatus::Packed,
            DocumentStatus::Packed,
        ]
    );
}

#[test]
fn test_legacy_evidence_reference_migrated() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::open(config(&dir)).unwrap();
    repo.load().unwrap();

    let mut linked = TimelineEvent::new("e1", "2020-01-01", "travel", "Trip");
    linked.evidence_ref = Some("d3".into());
    let mut free_text = TimelineEvent::new("e2", "2020-02-01", "travel", "Trip");
    free_text.evidence_ref = Some("boarding passes in drawer".into());
    repo.save_all_events(&[linked, free_text]).unwrap();

    let tracker = Tracker::with_repository(repo);
    let events = tracker.events();
    assert_eq!(events[0].linked_document_ids, vec!["d3"]);
    assert_eq!(events[0].evidence_ref, None);
    assert!(events[1].linked_document_ids.is_empty());
    assert_eq!(events[1].legacy_reference(), Some("boarding passes in drawer"));
}
