//! Cache update application.

use crate::types::{
    AppData, CivicsQuestion, Document, MasteryStore, NotesStore, TimelineEvent, UserSettings,
};

/// In-memory mirror of the repository.
pub type Cache = AppData;

/// A change to apply to the cache once the matching store write succeeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheUpdate {
    /// Insert or replace an event by id.
    PutEvent(TimelineEvent),
    RemoveEvent(String),
    SetEvents(Vec<TimelineEvent>),

    SetQuestions(Vec<CivicsQuestion>),

    /// Insert or replace a document by id.
    PutDocument(Document),
    /// Remove a document and detach its children.
    RemoveDocument(String),
    SetDocuments(Vec<Document>),

    SetMastered { id: u32, mastered: bool },
    SetMastery(MasteryStore),

    /// Empty content removes the note.
    SetNote { id: String, content: String },
    SetNotes(NotesStore),

    SetSettings(UserSettings),

    /// Swap everything, used after a reload.
    Replace(AppData),
}

/// Apply an update to the cache. Updates for unknown ids are no-ops except
/// the `Put*` variants, which append.
pub fn apply_update(cache: &mut Cache, update: CacheUpdate) {
    match update {
        CacheUpdate::PutEvent(event) => {
            match cache.events.iter_mut().find(|e| e.id == event.id) {
                Some(slot) => *slot = event,
                None => cache.events.push(event),
            }
        }

        CacheUpdate::RemoveEvent(id) => cache.events.retain(|e| e.id != id),

        CacheUpdate::SetEvents(events) => cache.events = events,

        CacheUpdate::SetQuestions(questions) => cache.questions = questions,

        CacheUpdate::PutDocument(doc) => match cache.docs.iter_mut().find(|d| d.id == doc.id) {
            Some(slot) => *slot = doc,
            None => cache.docs.push(doc),
        },

        CacheUpdate::RemoveDocument(id) => {
            cache.docs.retain(|d| d.id != id);
            for doc in &mut cache.docs {
                if doc.parent_id.as_deref() == Some(id.as_str()) {
                    doc.parent_id = None;
                }
            }
        }

        CacheUpdate::SetDocuments(docs) => cache.docs = docs,

        CacheUpdate::SetMastered { id, mastered } => cache.mastery.set(id, mastered),

        CacheUpdate::SetMastery(mastery) => cache.mastery = mastery,

        CacheUpdate::SetNote { id, content } => {
            if content.is_empty() {
                cache.notes.remove(&id);
            } else {
                cache.notes.insert(id, content);
            }
        }

        CacheUpdate::SetNotes(notes) => {
            cache.notes = notes
                .into_iter()
                .filter(|(_, content)| !content.is_empty())
                .collect();
        }

        CacheUpdate::SetSettings(settings) => cache.settings = settings,

        CacheUpdate::Replace(data) => *cache = data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentStatus;

    fn event(id: &str, title: &str) -> TimelineEvent {
        TimelineEvent::new(id, "2021-06-01", "travel", title)
    }

    #[test]
    fn test_put_event_upserts() {
        let mut cache = Cache::default();
        apply_update(&mut cache, CacheUpdate::PutEvent(event("e1", "First")));
        apply_update(&mut cache, CacheUpdate::PutEvent(event("e2", "Second")));
        apply_update(&mut cache, CacheUpdate::PutEvent(event("e1", "Edited")));

        assert_eq!(cache.events.len(), 2);
        assert_eq!(cache.events[0].title, "Edited");
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut cache = Cache::default();
        apply_update(&mut cache, CacheUpdate::PutEvent(event("e1", "First")));
        let before = cache.clone();

        apply_update(&mut cache, CacheUpdate::RemoveEvent("nope".into()));
        apply_update(&mut cache, CacheUpdate::RemoveDocument("nope".into()));
        assert_eq!(cache, before);
    }

    #[test]
    fn test_remove_document_detaches_children() {
        let mut cache = Cache::default();
        apply_update(
            &mut cache,
            CacheUpdate::SetDocuments(vec![
                Document::custom("p", "Parent", true),
                Document::custom("c", "Child", false).with_parent("p"),
            ]),
        );

        apply_update(&mut cache, CacheUpdate::RemoveDocument("p".into()));
        assert_eq!(cache.docs.len(), 1);
        assert!(!cache.docs[0].is_child());
    }

    #[test]
    fn test_put_document_replaces() {
        let mut cache = Cache::default();
        let mut doc = Document::custom("d", "Doc", true);
        apply_update(&mut cache, CacheUpdate::PutDocument(doc.clone()));

        doc.status = DocumentStatus::Found;
        apply_update(&mut cache, CacheUpdate::PutDocument(doc));
        assert_eq!(cache.docs.len(), 1);
        assert_eq!(cache.docs[0].status, DocumentStatus::Found);
    }

    #[test]
    fn test_mastery_and_notes() {
        let mut cache = Cache::default();
        apply_update(&mut cache, CacheUpdate::SetMastered { id: 4, mastered: true });
        assert!(cache.mastery.is_mastered(4));
        apply_update(&mut cache, CacheUpdate::SetMastered { id: 4, mastered: false });
        assert!(cache.mastery.is_empty());

        apply_update(
            &mut cache,
            CacheUpdate::SetNote { id: "q1".into(), content: "remember".into() },
        );
        apply_update(
            &mut cache,
            CacheUpdate::SetNote { id: "q1".into(), content: String::new() },
        );
        assert!(cache.notes.is_empty());

        let notes: NotesStore = [("a".to_string(), String::new()), ("b".to_string(), "x".to_string())]
            .into_iter()
            .collect();
        apply_update(&mut cache, CacheUpdate::SetNotes(notes));
        assert_eq!(cache.notes.len(), 1);
    }
}
