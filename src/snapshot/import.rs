use super::export::SNAPSHOT_VERSION;
use super::validate::{self, Filtered};
use crate::error::{Result, StoreError};
use crate::repository::{flatten_nesting, Repository};
use crate::types::{
    CivicsQuestion, Document, MasteryStore, NotesStore, TimelineEvent, UserSettings,
};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Top-level sections of a snapshot document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapshotSection {
    Events,
    Questions,
    Docs,
    Mastery,
    Notes,
    Settings,
}

impl SnapshotSection {
    pub const ALL: [SnapshotSection; 6] = [
        SnapshotSection::Events,
        SnapshotSection::Questions,
        SnapshotSection::Docs,
        SnapshotSection::Mastery,
        SnapshotSection::Notes,
        SnapshotSection::Settings,
    ];

    /// JSON key of the section.
    pub fn key(self) -> &'static str {
        match self {
            SnapshotSection::Events => "events",
            SnapshotSection::Questions => "questions",
            SnapshotSection::Docs => "docs",
            SnapshotSection::Mastery => "mastery",
            SnapshotSection::Notes => "notes",
            SnapshotSection::Settings => "settings",
        }
    }
}

impl fmt::Display for SnapshotSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// What an import did.
///
/// `applied` lists sections written to the store. `skipped` lists sections
/// that were present but had the wrong shape or no valid records. Sections
/// absent from the input appear in neither.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportOutcome {
    pub success: bool,
    pub message: String,
    pub applied: Vec<SnapshotSection>,
    pub skipped: Vec<SnapshotSection>,
}

impl ImportOutcome {
    pub(crate) fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
            applied: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// The sections of a parsed document that survived validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidatedSnapshot {
    pub events: Option<Vec<TimelineEvent>>,
    pub questions: Option<Vec<CivicsQuestion>>,
    pub docs: Option<Vec<Document>>,
    pub mastery: Option<MasteryStore>,
    pub notes: Option<NotesStore>,
    pub settings: Option<UserSettings>,
    pub skipped: Vec<SnapshotSection>,
    /// Set when the document declares a newer major format version.
    pub newer_version: Option<String>,
}

impl ValidatedSnapshot {
    fn has(&self, section: SnapshotSection) -> bool {
        match section {
            SnapshotSection::Events => self.events.is_some(),
            SnapshotSection::Questions => self.questions.is_some(),
            SnapshotSection::Docs => self.docs.is_some(),
            SnapshotSection::Mastery => self.mastery.is_some(),
            SnapshotSection::Notes => self.notes.is_some(),
            SnapshotSection::Settings => self.settings.is_some(),
        }
    }
}

/// Validate every section of `value` without touching storage.
///
/// A non-object document yields nothing to apply.
pub fn validate_snapshot(value: &Value) -> ValidatedSnapshot {
    let mut out = ValidatedSnapshot::default();
    let Some(obj) = value.as_object() else {
        return out;
    };

    out.newer_version = obj
        .get("version")
        .and_then(Value::as_str)
        .filter(|version| is_newer_major(version))
        .map(str::to_string);

    for section in SnapshotSection::ALL {
        let Some(raw) = obj.get(section.key()) else {
            continue;
        };

        match section {
            SnapshotSection::Events => {
                out.events = survivors(section, validate::filter_list(raw, validate::event));
            }
            SnapshotSection::Questions => {
                out.questions =
                    survivors(section, validate::filter_list(raw, validate::question));
            }
            SnapshotSection::Docs => {
                out.docs = survivors(section, validate::filter_list(raw, validate::document))
                    .map(normalize_documents);
            }
            SnapshotSection::Mastery => {
                out.mastery = survivors(section, validate::mastery(raw))
                    .map(|ids| ids.into_iter().collect());
            }
            SnapshotSection::Notes => {
                out.notes = survivors(section, validate::notes(raw))
                    .map(|entries| entries.into_iter().collect());
            }
            SnapshotSection::Settings => {
                out.settings = validate::settings(raw);
            }
        }

        if !out.has(section) {
            warn!(section = %section, "skipping import section with no valid records");
            out.skipped.push(section);
        }
    }
    out
}

/// Import a snapshot document into `repo`.
///
/// Malformed JSON is rejected with no effect. Otherwise each section is
/// applied independently; the caller should reload any cached state after a
/// successful import.
pub fn import_json(repo: &Repository, input: &str) -> ImportOutcome {
    let value: Value = match serde_json::from_str(input) {
        Ok(value) => value,
        Err(err) => {
            let err = StoreError::MalformedImport(err.to_string());
            warn!(error = %err, "rejected import");
            return ImportOutcome::failed(err.user_message());
        }
    };

    let validated = validate_snapshot(&value);
    let skipped = validated.skipped.clone();
    let newer_version = validated.newer_version.clone();
    if let Some(version) = &newer_version {
        warn!(version = %version, supported = SNAPSHOT_VERSION, "importing newer snapshot format");
    }

    let mut applied = Vec::new();
    match apply(repo, validated, &mut applied) {
        Ok(()) => {
            info!(applied = applied.len(), skipped = skipped.len(), "import finished");
            ImportOutcome {
                success: true,
                message: summary(&applied, &skipped, newer_version.as_deref()),
                applied,
                skipped,
            }
        }
        Err(err) => {
            error!(error = %err, applied = applied.len(), "import stopped");
            ImportOutcome {
                success: false,
                message: err.user_message(),
                applied,
                skipped,
            }
        }
    }
}

/// Read a backup file and import it.
pub fn import_file(repo: &Repository, path: &Path) -> ImportOutcome {
    match fs::read_to_string(path) {
        Ok(input) => import_json(repo, &input),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not read backup file");
            ImportOutcome::failed("The selected file could not be read.".to_string())
        }
    }
}

fn apply(
    repo: &Repository,
    validated: ValidatedSnapshot,
    applied: &mut Vec<SnapshotSection>,
) -> Result<()> {
    if let Some(events) = validated.events {
        repo.save_all_events(&events)?;
        applied.push(SnapshotSection::Events);
    }
    if let Some(questions) = validated.questions {
        repo.save_all_questions(&questions)?;
        applied.push(SnapshotSection::Questions);
    }
    if let Some(docs) = validated.docs {
        repo.save_all_documents(&docs)?;
        applied.push(SnapshotSection::Docs);
    }
    if let Some(mastery) = validated.mastery {
        repo.save_all_mastery(&mastery)?;
        applied.push(SnapshotSection::Mastery);
    }
    if let Some(notes) = validated.notes {
        repo.save_all_notes(&notes)?;
        applied.push(SnapshotSection::Notes);
    }
    if let Some(settings) = validated.settings {
        repo.save_settings(&settings)?;
        applied.push(SnapshotSection::Settings);
    }
    Ok(())
}

fn survivors<T>(section: SnapshotSection, filtered: Option<Filtered<T>>) -> Option<Vec<T>> {
    let filtered = filtered?;
    if filtered.dropped > 0 {
        warn!(section = %section, dropped = filtered.dropped, "dropped invalid records");
    }
    (!filtered.valid.is_empty()).then_some(filtered.valid)
}

/// Keep the last record per id, then clear parent links that cannot hold.
fn normalize_documents(docs: Vec<Document>) -> Vec<Document> {
    let mut seen = HashSet::new();
    let mut docs: Vec<Document> = docs
        .into_iter()
        .rev()
        .filter(|doc| seen.insert(doc.id.clone()))
        .collect();
    docs.reverse();

    let cleared = flatten_nesting(&mut docs);
    if cleared > 0 {
        warn!(cleared, "cleared invalid parent links on imported documents");
    }
    docs
}

fn major(version: &str) -> Option<u64> {
    version.trim_start_matches('v').split('.').next()?.parse().ok()
}

fn is_newer_major(version: &str) -> bool {
    match (major(version), major(SNAPSHOT_VERSION)) {
        (Some(theirs), Some(ours)) => theirs > ours,
        _ => false,
    }
}

fn summary(
    applied: &[SnapshotSection],
    skipped: &[SnapshotSection],
    newer_version: Option<&str>,
) -> String {
    let mut message = if applied.is_empty() {
        "No importable data was found in the file.".to_string()
    } else {
        "Data imported successfully.".to_string()
    };
    if !skipped.is_empty() {
        let names: Vec<&str> = skipped.iter().map(|s| s.key()).collect();
        message.push_str(&format!(" Skipped invalid sections: {}.", names.join(", ")));
    }
    if let Some(version) = newer_version {
        message.push_str(&format!(
            " The file was made by a newer version ({version}); some data may not have been recognized."
        ));
    }
    message
}
