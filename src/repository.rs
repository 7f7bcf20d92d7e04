//! Typed read/write operations per entity kind.
//!
//! The repository owns seeding, the legacy evidence migration and the
//! document nesting rule. Callers never see collection names or keys.

use crate::defaults::{default_documents, default_questions};
use crate::error::{Result, StoreError};
use crate::records::{Collection, RecordKey};
use crate::store::{RecordStore, StoreConfig};
use crate::types::{
    AppData, CivicsQuestion, Document, MasteryStore, NotesStore, TimelineEvent, UserSettings,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Key of the singleton settings record.
const SETTINGS_KEY: &str = "user";

/// Typed access to the record store.
#[derive(Clone)]
pub struct Repository {
    store: Arc<RecordStore>,
}

impl Repository {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn open(config: StoreConfig) -> Result<Self> {
        Ok(Self::new(RecordStore::open(config)?))
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    // --- Lifecycle ---

    /// Seed empty collections, migrate legacy fields, and return everything.
    ///
    /// Safe to call repeatedly: seeding only touches empty collections.
    pub fn load(&self) -> Result<AppData> {
        self.seed_defaults()?;
        self.migrate_evidence_refs()?;

        Ok(AppData {
            events: self.events(),
            questions: self.questions(),
            docs: self.documents(),
            mastery: self.mastery(),
            notes: self.notes(),
            settings: self.settings().unwrap_or_default(),
        })
    }

    /// Write the default question bank and checklist into empty collections.
    pub fn seed_defaults(&self) -> Result<()> {
        if self.store.is_empty(Collection::Questions) {
            info!("seeding default question bank");
            self.save_all_questions(&default_questions())?;
        }
        if self.store.is_empty(Collection::Documents) {
            info!("seeding default document checklist");
            self.save_all_documents(&default_documents())?;
        }
        Ok(())
    }

    /// Clear every collection, then re-seed questions and documents.
    pub fn reset_all(&self) -> Result<()> {
        info!("resetting all data to defaults");
        self.store.clear_all()?;
        self.seed_defaults()
    }

    /// Move legacy `evidenceRef` values that name a document into
    /// `linkedDocIds`. Free-text references are left for dual reading.
    ///
    /// Works on the raw records so fields this version cannot decode
    /// survive the rewrite.
    fn migrate_evidence_refs(&self) -> Result<()> {
        let doc_ids: HashSet<String> = self.documents().into_iter().map(|d| d.id).collect();
        let mut records = self.store.get_all(Collection::Events);
        let mut migrated = 0usize;

        for record in &mut records {
            let Some(fields) = record.as_object_mut() else {
                continue;
            };
            let linked = fields
                .get("linkedDocIds")
                .and_then(Value::as_array)
                .is_some_and(|ids| !ids.is_empty());
            if linked {
                continue;
            }
            let Some(reference) = fields.get("evidenceRef").and_then(Value::as_str) else {
                continue;
            };
            if !doc_ids.contains(reference) {
                continue;
            }

            let reference = reference.to_string();
            fields.remove("evidenceRef");
            fields.insert("linkedDocIds".into(), json!([reference]));
            migrated += 1;
        }

        if migrated > 0 {
            info!(migrated, "migrated legacy evidence references");
            self.store.replace_all(Collection::Events, records)?;
        }
        Ok(())
    }

    // --- Events ---

    pub fn events(&self) -> Vec<TimelineEvent> {
        decode_all(Collection::Events, self.store.get_all(Collection::Events))
    }

    /// Insert or update an event. Returns the event as stored.
    ///
    /// The legacy reference is dropped once linked documents exist.
    pub fn save_event(&self, event: &TimelineEvent) -> Result<TimelineEvent> {
        let event = event.clone().normalized();
        self.store.put(Collection::Events, encode(&event)?)?;
        Ok(event)
    }

    pub fn delete_event(&self, id: &str) -> Result<()> {
        self.store.delete(Collection::Events, &RecordKey::from(id))
    }

    pub fn save_all_events(&self, events: &[TimelineEvent]) -> Result<()> {
        self.store
            .replace_all(Collection::Events, encode_all(events)?)
    }

    // --- Questions ---

    pub fn questions(&self) -> Vec<CivicsQuestion> {
        decode_all(Collection::Questions, self.store.get_all(Collection::Questions))
    }

    /// Swap the whole question bank.
    pub fn save_all_questions(&self, questions: &[CivicsQuestion]) -> Result<()> {
        self.store
            .replace_all(Collection::Questions, encode_all(questions)?)
    }

    // --- Documents ---

    pub fn documents(&self) -> Vec<Document> {
        decode_all(Collection::Documents, self.store.get_all(Collection::Documents))
    }

    pub fn document(&self, id: &str) -> Option<Document> {
        self.store
            .get(Collection::Documents, &RecordKey::from(id))
            .and_then(|value| decode(Collection::Documents, value))
    }

    /// Insert or update a document, enforcing one level of nesting.
    pub fn save_document(&self, doc: &Document) -> Result<()> {
        let mut others = self.documents();
        others.retain(|d| d.id != doc.id);
        if let Some(reason) = nesting_violation(doc, &others) {
            return Err(StoreError::InvalidOperation(reason));
        }
        self.store.put(Collection::Documents, encode(doc)?)
    }

    /// Remove a document. Children of a removed parent become top-level.
    pub fn delete_document(&self, id: &str) -> Result<()> {
        let key = RecordKey::from(id);
        let is_child_of = |record: &Value| {
            record.get("parentId").and_then(Value::as_str) == Some(id)
        };

        let records = self.store.get_all(Collection::Documents);
        if !records.iter().any(is_child_of) {
            return self.store.delete(Collection::Documents, &key);
        }

        let remaining: Vec<Value> = records
            .into_iter()
            .filter(|record| Collection::Documents.key_of(record).as_ref() != Some(&key))
            .map(|mut record| {
                if is_child_of(&record) {
                    if let Some(fields) = record.as_object_mut() {
                        fields.remove("parentId");
                    }
                }
                record
            })
            .collect();
        self.store.replace_all(Collection::Documents, remaining)
    }

    /// Swap the whole document collection. The batch must respect nesting.
    pub fn save_all_documents(&self, docs: &[Document]) -> Result<()> {
        for doc in docs {
            let others: Vec<Document> = docs.iter().filter(|d| d.id != doc.id).cloned().collect();
            if let Some(reason) = nesting_violation(doc, &others) {
                return Err(StoreError::InvalidOperation(reason));
            }
        }
        self.store
            .replace_all(Collection::Documents, encode_all(docs)?)
    }

    /// Move a document one status forward. `None` if the id is unknown.
    pub fn advance_document(&self, id: &str) -> Result<Option<Document>> {
        self.update_status(id, |doc| doc.status = doc.status.advance())
    }

    /// Put a document back to `missing`. `None` if the id is unknown.
    pub fn reset_document(&self, id: &str) -> Result<Option<Document>> {
        self.update_status(id, |doc| doc.status = doc.status.reset())
    }

    fn update_status(
        &self,
        id: &str,
        change: impl FnOnce(&mut Document),
    ) -> Result<Option<Document>> {
        let Some(mut doc) = self.document(id) else {
            return Ok(None);
        };
        change(&mut doc);
        self.store.put(Collection::Documents, encode(&doc)?)?;
        Ok(Some(doc))
    }

    // --- Mastery ---

    pub fn mastery(&self) -> MasteryStore {
        self.store
            .get_all(Collection::Mastery)
            .iter()
            .filter(|record| record["mastered"].as_bool() == Some(true))
            .filter_map(|record| record["id"].as_u64())
            .filter_map(|id| u32::try_from(id).ok())
            .collect()
    }

    /// `true` upserts the flag record, `false` deletes it.
    pub fn set_mastery(&self, id: u32, mastered: bool) -> Result<()> {
        if mastered {
            self.store
                .put(Collection::Mastery, json!({"id": id, "mastered": true}))
        } else {
            self.store.delete(Collection::Mastery, &RecordKey::from(id))
        }
    }

    pub fn save_all_mastery(&self, mastery: &MasteryStore) -> Result<()> {
        let records = mastery
            .ids()
            .map(|id| json!({"id": id, "mastered": true}))
            .collect();
        self.store.replace_all(Collection::Mastery, records)
    }

    // --- Notes ---

    pub fn notes(&self) -> NotesStore {
        self.store
            .get_all(Collection::Notes)
            .iter()
            .filter_map(|record| {
                let id = record["id"].as_str()?;
                let content = record["content"].as_str()?;
                (!content.is_empty()).then(|| (id.to_string(), content.to_string()))
            })
            .collect()
    }

    /// Empty content deletes the note.
    pub fn set_note(&self, id: &str, content: &str) -> Result<()> {
        if content.is_empty() {
            self.store.delete(Collection::Notes, &RecordKey::from(id))
        } else {
            self.store
                .put(Collection::Notes, json!({"id": id, "content": content}))
        }
    }

    pub fn save_all_notes(&self, notes: &NotesStore) -> Result<()> {
        let records = notes
            .iter()
            .filter(|(_, content)| !content.is_empty())
            .map(|(id, content)| json!({"id": id, "content": content}))
            .collect();
        self.store.replace_all(Collection::Notes, records)
    }

    // --- Settings ---

    pub fn settings(&self) -> Option<UserSettings> {
        self.store
            .get(Collection::Settings, &RecordKey::from(SETTINGS_KEY))
            .and_then(|value| decode(Collection::Settings, value))
    }

    pub fn save_settings(&self, settings: &UserSettings) -> Result<()> {
        self.store.put_keyed(
            Collection::Settings,
            RecordKey::from(SETTINGS_KEY),
            encode(settings)?,
        )
    }
}

/// Why `doc` cannot be stored next to `others`, if it cannot.
pub(crate) fn nesting_violation(doc: &Document, others: &[Document]) -> Option<String> {
    let parent_id = doc.parent_id.as_deref()?;

    if parent_id == doc.id {
        return Some(format!("Document '{}' cannot be its own parent", doc.name));
    }
    let Some(parent) = others.iter().find(|d| d.id == parent_id) else {
        return Some(format!("Parent document '{}' does not exist", parent_id));
    };
    if parent.is_child() {
        return Some(format!(
            "'{}' is already a sub-document and cannot hold '{}'",
            parent.name, doc.name
        ));
    }
    if others.iter().any(|d| d.parent_id.as_deref() == Some(doc.id.as_str())) {
        return Some(format!(
            "'{}' has sub-documents and cannot be nested",
            doc.name
        ));
    }
    None
}

/// Clear parent references that dangle or would nest deeper than one level.
///
/// Returns how many references were cleared.
pub(crate) fn flatten_nesting(docs: &mut [Document]) -> usize {
    let roots: HashSet<String> = docs
        .iter()
        .filter(|d| !d.is_child())
        .map(|d| d.id.clone())
        .collect();

    let mut cleared = 0;
    for doc in docs.iter_mut() {
        let valid = match doc.parent_id.as_deref() {
            None => continue,
            Some(parent) => parent != doc.id && roots.contains(parent),
        };
        if !valid {
            doc.parent_id = None;
            cleared += 1;
        }
    }
    cleared
}

fn encode<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn encode_all<T: Serialize>(values: &[T]) -> Result<Vec<Value>> {
    values.iter().map(encode).collect()
}

fn decode<T: DeserializeOwned>(collection: Collection, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(%collection, error = %e, "skipping unreadable record");
            None
        }
    }
}

fn decode_all<T: DeserializeOwned>(collection: Collection, values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| decode(collection, value))
        .collect()
}
