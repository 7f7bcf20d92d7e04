//! Portable backups.
//!
//! Export reads every collection through the [`Repository`] and produces a
//! complete [`AppSnapshot`](crate::types::AppSnapshot). Import parses any
//! JSON document, validates each section on its own, and overwrites only the
//! sections that carry at least one valid record. Absent or malformed
//! sections leave local data untouched.
//!
//! [`Repository`]: crate::repository::Repository

mod export;
mod import;
pub mod validate;

pub(crate) use export::snapshot_from;
pub use export::{
    backup_file_name, export_snapshot, snapshot_to_json, write_backup, SNAPSHOT_VERSION,
};
pub use import::{
    import_file, import_json, validate_snapshot, ImportOutcome, SnapshotSection,
    ValidatedSnapshot,
};
