//! Domain types persisted by the companion store.
//!
//! Field names on the wire follow the backup format produced by the web
//! application (`desc`, `linkedDocIds`, `q`, `a`, ...). Readers also accept
//! the long spellings so hand-written backups load too.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A life event on the residence timeline (address, job, trip, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,

    /// ISO date (`YYYY-MM-DD`).
    pub date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    /// Category id. Open set: custom categories live in [`UserSettings`].
    #[serde(rename = "type")]
    pub event_type: String,

    pub title: String,

    #[serde(
        rename = "desc",
        alias = "description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(
        rename = "linkedDocIds",
        alias = "linkedDocumentIds",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub linked_document_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_link: Option<String>,

    /// Deprecated single-string reference. Read for compatibility only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_ref: Option<String>,
}

impl TimelineEvent {
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        event_type: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            end_date: None,
            event_type: event_type.into(),
            title: title.into(),
            description: None,
            linked_document_ids: Vec::new(),
            evidence_link: None,
            evidence_ref: None,
        }
    }

    /// Linked document ids. The legacy reference is never consulted here.
    pub fn linked_documents(&self) -> &[String] {
        &self.linked_document_ids
    }

    /// Drop the legacy reference once linked documents exist.
    pub fn normalized(mut self) -> Self {
        if !self.linked_document_ids.is_empty() {
            self.evidence_ref = None;
        }
        self
    }

    /// The legacy evidence reference, only when no linked documents exist.
    pub fn legacy_reference(&self) -> Option<&str> {
        if self.linked_document_ids.is_empty() {
            self.evidence_ref.as_deref().filter(|r| !r.is_empty())
        } else {
            None
        }
    }
}

/// A civics test flashcard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivicsQuestion {
    pub id: u32,
    #[serde(rename = "q", alias = "question")]
    pub question: String,
    #[serde(rename = "a", alias = "answer")]
    pub answer: String,
    pub section: String,
}

/// Preparation status of a checklist document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Missing,
    Found,
    Copied,
    Uploaded,
    Packed,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 5] = [
        DocumentStatus::Missing,
        DocumentStatus::Found,
        DocumentStatus::Copied,
        DocumentStatus::Uploaded,
        DocumentStatus::Packed,
    ];

    /// Next status in the progression. Clamps at `Packed`.
    pub fn advance(self) -> Self {
        match self {
            DocumentStatus::Missing => DocumentStatus::Found,
            DocumentStatus::Found => DocumentStatus::Copied,
            DocumentStatus::Copied => DocumentStatus::Uploaded,
            DocumentStatus::Uploaded | DocumentStatus::Packed => DocumentStatus::Packed,
        }
    }

    pub fn reset(self) -> Self {
        DocumentStatus::Missing
    }

    /// Uploaded or packed documents count as ready for the interview.
    pub fn is_ready(self) -> bool {
        matches!(self, DocumentStatus::Uploaded | DocumentStatus::Packed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Missing => "missing",
            DocumentStatus::Found => "found",
            DocumentStatus::Copied => "copied",
            DocumentStatus::Uploaded => "uploaded",
            DocumentStatus::Packed => "packed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A checklist document. At most one level of nesting via `parent_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub status: DocumentStatus,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub meta: DocumentMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_custom: bool,
    #[serde(
        rename = "submittedToUSCIS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub submitted_to_uscis: Option<bool>,
}

impl Document {
    /// A user-added document with status `missing`.
    pub fn custom(id: impl Into<String>, name: impl Into<String>, required: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: DocumentStatus::Missing,
            required,
            notes: None,
            meta: DocumentMeta::default(),
            parent_id: None,
            is_custom: true,
            submitted_to_uscis: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn is_child(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// A timeline category: id, display label and color token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCategory {
    pub id: String,
    pub label: String,
    pub color: String,
}

impl EventCategory {
    fn builtin(id: &str, label: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            color: color.to_string(),
        }
    }
}

/// Built-in timeline categories.
pub fn default_event_categories() -> Vec<EventCategory> {
    vec![
        EventCategory::builtin("address", "Address", "green"),
        EventCategory::builtin("employment", "Employment", "blue"),
        EventCategory::builtin("trip", "Travel", "purple"),
        EventCategory::builtin("tax", "Tax", "amber"),
        EventCategory::builtin("legal", "Legal", "red"),
        EventCategory::builtin("other", "Other", "slate"),
    ]
}

/// Singleton profile record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green_card_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filing_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_categories: Option<Vec<EventCategory>>,
    /// Alien registration number (A-Number).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alien_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alien_number_blurred: Option<bool>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self::named("Applicant")
    }
}

impl UserSettings {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arrival_date: None,
            green_card_date: None,
            filing_date: None,
            interview_date: None,
            dark_mode: None,
            event_categories: None,
            alien_number: None,
            alien_number_blurred: None,
        }
    }

    /// Custom categories when configured, otherwise the built-in set.
    pub fn categories(&self) -> Vec<EventCategory> {
        match &self.event_categories {
            Some(custom) if !custom.is_empty() => custom.clone(),
            _ => default_event_categories(),
        }
    }
}

/// Set of mastered question ids.
///
/// Serialized as an `id -> true` map. Un-mastered questions have no entry,
/// so a `false` flag can never be stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MasteryStore(BTreeSet<u32>);

impl MasteryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mastered(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    /// Record a flag. `false` removes the entry.
    pub fn set(&mut self, id: u32, mastered: bool) {
        if mastered {
            self.0.insert(id);
        } else {
            self.0.remove(&id);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u32> for MasteryStore {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for MasteryStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for id in &self.0 {
            map.serialize_entry(id, &true)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MasteryStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let flags = BTreeMap::<u32, bool>::deserialize(deserializer)?;
        Ok(flags
            .into_iter()
            .filter_map(|(id, mastered)| mastered.then_some(id))
            .collect())
    }
}

/// Free-text notes keyed by scope (question id, document id, section key).
pub type NotesStore = BTreeMap<String, String>;

/// Everything the application holds, as loaded from the repository.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppData {
    pub events: Vec<TimelineEvent>,
    pub questions: Vec<CivicsQuestion>,
    pub docs: Vec<Document>,
    pub mastery: MasteryStore,
    pub notes: NotesStore,
    pub settings: UserSettings,
}

/// Portable backup document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSnapshot {
    pub events: Vec<TimelineEvent>,
    pub questions: Vec<CivicsQuestion>,
    pub docs: Vec<Document>,
    pub mastery: MasteryStore,
    pub notes: NotesStore,
    pub settings: UserSettings,
    /// Snapshot format version (semantic version string).
    pub version: String,
    /// RFC 3339 timestamp of the export.
    pub exported_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_advance_clamps() {
        let mut status = DocumentStatus::Missing;
        let mut seen = Vec::new();
        for _ in 0..5 {
            status = status.advance();
            seen.push(status);
        }
        assert_eq!(
            seen,
            vec![
                DocumentStatus::Found,
                DocumentStatus::Copied,
                DocumentStatus::Uploaded,
                DocumentStatus::Packed,
                DocumentStatus::Packed,
            ]
        );
        assert_eq!(DocumentStatus::Packed.reset(), DocumentStatus::Missing);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(DocumentStatus::parse("copied"), Some(DocumentStatus::Copied));
        assert_eq!(DocumentStatus::parse("Copied"), None);
        assert!(DocumentStatus::Uploaded.is_ready());
        assert!(!DocumentStatus::Found.is_ready());
    }

    #[test]
    fn test_event_wire_names() {
        let mut event = TimelineEvent::new("e1", "2020-01-01", "trip", "Lisbon");
        event.description = Some("vacation".into());
        event.linked_document_ids = vec!["d3".into()];

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "trip");
        assert_eq!(value["desc"], "vacation");
        assert_eq!(value["linkedDocIds"], json!(["d3"]));
        assert!(value.get("evidenceRef").is_none());
        assert!(value.get("endDate").is_none());
    }

    #[test]
    fn test_event_accepts_long_names() {
        let event: TimelineEvent = serde_json::from_value(json!({
            "id": "e1",
            "date": "2020-01-01",
            "type": "address",
            "title": "Moved",
            "description": "new flat",
            "linkedDocumentIds": ["d9"]
        }))
        .unwrap();
        assert_eq!(event.description.as_deref(), Some("new flat"));
        assert_eq!(event.linked_documents(), ["d9".to_string()]);
    }

    #[test]
    fn test_legacy_reference_prefers_new_field() {
        let mut event = TimelineEvent::new("e1", "2020-01-01", "tax", "Filed");
        event.evidence_ref = Some("1040 copy".into());
        assert_eq!(event.legacy_reference(), Some("1040 copy"));

        event.linked_document_ids = vec!["d6".into()];
        assert_eq!(event.legacy_reference(), None);
    }

    #[test]
    fn test_mastery_serializes_as_true_map() {
        let mastery: MasteryStore = [3, 1].into_iter().collect();
        let value = serde_json::to_value(&mastery).unwrap();
        assert_eq!(value, json!({"1": true, "3": true}));

        let parsed: MasteryStore =
            serde_json::from_value(json!({"1": true, "2": false})).unwrap();
        assert!(parsed.is_mastered(1));
        assert!(!parsed.is_mastered(2));
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_settings_categories_fallback() {
        let mut settings = UserSettings::default();
        assert_eq!(settings.name, "Applicant");
        assert_eq!(settings.categories().len(), 6);

        settings.event_categories = Some(vec![]);
        assert_eq!(settings.categories().len(), 6);

        settings.event_categories = Some(vec![EventCategory {
            id: "school".into(),
            label: "School".into(),
            color: "teal".into(),
        }]);
        assert_eq!(settings.categories()[0].id, "school");
    }

    #[test]
    fn test_document_optional_flags_skipped() {
        let doc = Document {
            is_custom: false,
            ..Document::custom("d1", "Passport", true)
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("isCustom").is_none());
        assert!(value.get("parentId").is_none());
        assert_eq!(value["status"], "missing");
        assert_eq!(value["meta"], json!({}));
    }
}
