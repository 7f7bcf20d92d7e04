use super::operations::{apply_update, Cache, CacheUpdate};
use super::views::{self, Progress};
use crate::defaults::{default_documents, default_questions, default_settings};
use crate::error::{Result, StoreError};
use crate::repository::{nesting_violation, Repository};
use crate::snapshot::{self, ImportOutcome};
use crate::store::StoreConfig;
use crate::types::{
    AppSnapshot, CivicsQuestion, Document, DocumentStatus, MasteryStore, NotesStore,
    TimelineEvent, UserSettings,
};
use chrono::Utc;
use std::path::Path;
use tracing::{debug, error, info};

/// Where the initial load ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Storage failed; the session runs on in-memory defaults.
    Error(String),
}

/// Write-through cache over the repository.
///
/// Every mutation writes to the repository first and touches the cache
/// only after the write succeeded, so a failed write leaves the cache as it
/// was. Imports and resets invalidate the whole cache via [`reload`].
///
/// Without a repository (storage unavailable) mutations apply to the cache
/// alone and nothing is saved.
///
/// [`reload`]: Tracker::reload
pub struct Tracker {
    repo: Option<Repository>,
    cache: Cache,
    state: LoadState,
}

impl Tracker {
    /// Open the store at `config` and load it. Never fails: storage errors
    /// leave the tracker in [`LoadState::Error`] on built-in defaults.
    pub fn open(config: StoreConfig) -> Self {
        match Repository::open(config) {
            Ok(repo) => Self::with_repository(repo),
            Err(err) => Self::memory_only(&err),
        }
    }

    pub fn with_repository(repo: Repository) -> Self {
        let mut tracker = Self {
            repo: Some(repo),
            cache: Cache::default(),
            state: LoadState::Loading,
        };
        tracker.reload();
        tracker
    }

    fn memory_only(err: &StoreError) -> Self {
        error!(error = %err, "storage unavailable, running without persistence");
        Self {
            repo: None,
            cache: default_cache(),
            state: LoadState::Error(err.user_message()),
        }
    }

    /// Replace the cache with what the repository holds.
    pub fn reload(&mut self) -> &LoadState {
        let Some(repo) = &self.repo else {
            return &self.state;
        };

        self.state = LoadState::Loading;
        match repo.load() {
            Ok(data) => {
                apply_update(&mut self.cache, CacheUpdate::Replace(data));
                self.state = LoadState::Ready;
                debug!(
                    events = self.cache.events.len(),
                    docs = self.cache.docs.len(),
                    "cache loaded"
                );
            }
            Err(err) => {
                error!(error = %err, "load failed, falling back to defaults");
                self.repo = None;
                self.cache = default_cache();
                self.state = LoadState::Error(err.user_message());
            }
        }
        &self.state
    }

    // --- Reads ---

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Whether changes are being saved.
    pub fn is_persistent(&self) -> bool {
        self.repo.is_some()
    }

    pub fn repository(&self) -> Option<&Repository> {
        self.repo.as_ref()
    }

    pub fn data(&self) -> &Cache {
        &self.cache
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.cache.events
    }

    pub fn questions(&self) -> &[CivicsQuestion] {
        &self.cache.questions
    }

    pub fn documents(&self) -> &[Document] {
        &self.cache.docs
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.cache.docs.iter().find(|d| d.id == id)
    }

    pub fn mastery(&self) -> &MasteryStore {
        &self.cache.mastery
    }

    pub fn notes(&self) -> &NotesStore {
        &self.cache.notes
    }

    pub fn note(&self, id: &str) -> Option<&str> {
        self.cache.notes.get(id).map(String::as_str)
    }

    pub fn settings(&self) -> &UserSettings {
        &self.cache.settings
    }

    pub fn events_newest_first(&self) -> Vec<&TimelineEvent> {
        views::events_newest_first(&self.cache.events)
    }

    pub fn events_in_category(&self, category: &str) -> Vec<&TimelineEvent> {
        views::events_in_category(&self.cache.events, category)
    }

    pub fn progress(&self) -> Progress {
        Progress::compute(&self.cache, Utc::now().date_naive())
    }

    // --- Events ---

    /// Insert or update an event. Returns it as stored.
    pub fn save_event(&mut self, event: TimelineEvent) -> Result<TimelineEvent> {
        let stored = match &self.repo {
            Some(repo) => repo.save_event(&event)?,
            None => event.normalized(),
        };
        apply_update(&mut self.cache, CacheUpdate::PutEvent(stored.clone()));
        Ok(stored)
    }

    pub fn delete_event(&mut self, id: &str) -> Result<()> {
        self.commit(
            |repo| repo.delete_event(id),
            CacheUpdate::RemoveEvent(id.to_string()),
        )
    }

    pub fn set_all_events(&mut self, events: Vec<TimelineEvent>) -> Result<()> {
        self.commit(
            |repo| repo.save_all_events(&events),
            CacheUpdate::SetEvents(events.clone()),
        )
    }

    // --- Questions ---

    pub fn set_all_questions(&mut self, questions: Vec<CivicsQuestion>) -> Result<()> {
        self.commit(
            |repo| repo.save_all_questions(&questions),
            CacheUpdate::SetQuestions(questions.clone()),
        )
    }

    // --- Documents ---

    /// Insert or update a document. Rejects nesting deeper than one level.
    pub fn save_document(&mut self, doc: Document) -> Result<()> {
        if self.repo.is_none() {
            let others: Vec<Document> =
                self.cache.docs.iter().filter(|d| d.id != doc.id).cloned().collect();
            if let Some(reason) = nesting_violation(&doc, &others) {
                return Err(StoreError::InvalidOperation(reason));
            }
        }
        self.commit(
            |repo| repo.save_document(&doc),
            CacheUpdate::PutDocument(doc.clone()),
        )
    }

    /// Delete a document; its children become top-level.
    pub fn delete_document(&mut self, id: &str) -> Result<()> {
        self.commit(
            |repo| repo.delete_document(id),
            CacheUpdate::RemoveDocument(id.to_string()),
        )
    }

    pub fn set_all_documents(&mut self, docs: Vec<Document>) -> Result<()> {
        self.commit(
            |repo| repo.save_all_documents(&docs),
            CacheUpdate::SetDocuments(docs.clone()),
        )
    }

    /// Move a document one status forward. `None` if the id is unknown.
    pub fn advance_document(&mut self, id: &str) -> Result<Option<Document>> {
        let updated = match &self.repo {
            Some(repo) => repo.advance_document(id)?,
            None => self.with_status(id, DocumentStatus::advance),
        };
        Ok(self.cache_document(updated))
    }

    /// Put a document back to `missing`. `None` if the id is unknown.
    pub fn reset_document(&mut self, id: &str) -> Result<Option<Document>> {
        let updated = match &self.repo {
            Some(repo) => repo.reset_document(id)?,
            None => self.with_status(id, DocumentStatus::reset),
        };
        Ok(self.cache_document(updated))
    }

    fn with_status(
        &self,
        id: &str,
        change: fn(DocumentStatus) -> DocumentStatus,
    ) -> Option<Document> {
        let mut doc = self.document(id)?.clone();
        doc.status = change(doc.status);
        Some(doc)
    }

    fn cache_document(&mut self, updated: Option<Document>) -> Option<Document> {
        if let Some(doc) = &updated {
            apply_update(&mut self.cache, CacheUpdate::PutDocument(doc.clone()));
        }
        updated
    }

    // --- Mastery ---

    /// Flip a question's mastered flag. Returns the new value.
    pub fn toggle_mastery(&mut self, id: u32) -> Result<bool> {
        let mastered = !self.cache.mastery.is_mastered(id);
        self.set_mastery(id, mastered)?;
        Ok(mastered)
    }

    pub fn set_mastery(&mut self, id: u32, mastered: bool) -> Result<()> {
        self.commit(
            |repo| repo.set_mastery(id, mastered),
            CacheUpdate::SetMastered { id, mastered },
        )
    }

    pub fn set_all_mastery(&mut self, mastery: MasteryStore) -> Result<()> {
        self.commit(
            |repo| repo.save_all_mastery(&mastery),
            CacheUpdate::SetMastery(mastery.clone()),
        )
    }

    // --- Notes ---

    /// Set a note. Empty content deletes it.
    pub fn update_note(&mut self, id: &str, content: &str) -> Result<()> {
        self.commit(
            |repo| repo.set_note(id, content),
            CacheUpdate::SetNote {
                id: id.to_string(),
                content: content.to_string(),
            },
        )
    }

    pub fn set_all_notes(&mut self, notes: NotesStore) -> Result<()> {
        self.commit(
            |repo| repo.save_all_notes(&notes),
            CacheUpdate::SetNotes(notes.clone()),
        )
    }

    // --- Settings ---

    pub fn update_settings(&mut self, settings: UserSettings) -> Result<()> {
        self.commit(
            |repo| repo.save_settings(&settings),
            CacheUpdate::SetSettings(settings.clone()),
        )
    }

    // --- Bulk ---

    /// Clear everything back to the seeded defaults.
    pub fn reset_all(&mut self) -> Result<()> {
        match &self.repo {
            Some(repo) => {
                repo.reset_all()?;
                self.reload();
            }
            None => self.cache = default_cache(),
        }
        info!("reset all data");
        Ok(())
    }

    /// Import a backup document, then reload the cache.
    pub fn import_json(&mut self, input: &str) -> ImportOutcome {
        let Some(repo) = &self.repo else {
            return unavailable_import();
        };
        let outcome = snapshot::import_json(repo, input);
        if !outcome.applied.is_empty() {
            self.reload();
        }
        outcome
    }

    pub fn import_file(&mut self, path: &Path) -> ImportOutcome {
        let Some(repo) = &self.repo else {
            return unavailable_import();
        };
        let outcome = snapshot::import_file(repo, path);
        if !outcome.applied.is_empty() {
            self.reload();
        }
        outcome
    }

    /// Snapshot of the current data.
    pub fn export(&self) -> AppSnapshot {
        match &self.repo {
            Some(repo) => snapshot::export_snapshot(repo),
            None => snapshot::snapshot_from(self.cache.clone()),
        }
    }

    fn commit(
        &mut self,
        write: impl FnOnce(&Repository) -> Result<()>,
        update: CacheUpdate,
    ) -> Result<()> {
        if let Some(repo) = &self.repo {
            write(repo)?;
        }
        apply_update(&mut self.cache, update);
        Ok(())
    }
}

fn default_cache() -> Cache {
    Cache {
        questions: default_questions(),
        docs: default_documents(),
        settings: default_settings(),
        ..Cache::default()
    }
}

fn unavailable_import() -> ImportOutcome {
    ImportOutcome::failed(
        "Local storage is unavailable, so the backup cannot be restored in this session."
            .to_string(),
    )
}
