use crate::defaults::{default_documents, default_questions, default_settings};
use crate::error::Result;
use crate::repository::Repository;
use crate::types::{AppData, AppSnapshot};
use chrono::{NaiveDate, SecondsFormat, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Format version stamped on every export.
pub const SNAPSHOT_VERSION: &str = "0.1.0";

/// Read every collection into a snapshot.
///
/// Empty question and document collections are filled from the built-in
/// defaults and missing settings from [`default_settings`], so the result
/// is always complete.
pub fn export_snapshot(repo: &Repository) -> AppSnapshot {
    snapshot_from(AppData {
        events: repo.events(),
        questions: repo.questions(),
        docs: repo.documents(),
        mastery: repo.mastery(),
        notes: repo.notes(),
        settings: repo.settings().unwrap_or_else(default_settings),
    })
}

/// Stamp `data` as a snapshot, filling empty questions and documents.
pub(crate) fn snapshot_from(data: AppData) -> AppSnapshot {
    let AppData {
        events,
        mut questions,
        mut docs,
        mastery,
        notes,
        settings,
    } = data;
    if questions.is_empty() {
        questions = default_questions();
    }
    if docs.is_empty() {
        docs = default_documents();
    }

    AppSnapshot {
        events,
        questions,
        docs,
        mastery,
        notes,
        settings,
        version: SNAPSHOT_VERSION.to_string(),
        exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

pub fn snapshot_to_json(snapshot: &AppSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// `n400-backup-YYYY-MM-DD.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("n400-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Export into `dir` under today's backup file name. Returns the file path.
pub fn write_backup(repo: &Repository, dir: &Path) -> Result<PathBuf> {
    let snapshot = export_snapshot(repo);
    let json = snapshot_to_json(&snapshot)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(backup_file_name(Utc::now().date_naive()));
    fs::write(&path, json)?;

    info!(
        path = %path.display(),
        events = snapshot.events.len(),
        docs = snapshot.docs.len(),
        "wrote backup"
    );
    Ok(path)
}
