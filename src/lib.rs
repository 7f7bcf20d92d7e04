//! # N-400 Companion
//!
//! Local persistence for a naturalization interview tracker: timeline
//! events, the civics question bank, the document checklist, mastery flags,
//! notes and user settings.
//!
//! ## Layers
//!
//! - **Record store**: named collections on disk, with a write-ahead log so
//!   bulk replacements are all-or-nothing
//! - **Repository**: typed per-entity operations and default seeding
//! - **Tracker**: write-through in-memory cache for the UI
//! - **Snapshot**: JSON backup export and best-effort import
//!
//! ## Example
//!
//! ```ignore
//! use n400_companion::{StoreConfig, TimelineEvent, Tracker};
//!
//! let mut tracker = Tracker::open(StoreConfig::at("./n400-data"));
//!
//! tracker.save_event(TimelineEvent::new("e1", "2019-04-02", "travel", "Trip to Lisbon"))?;
//! tracker.advance_document("d1")?;
//! tracker.toggle_mastery(12)?;
//!
//! let backup = n400_companion::snapshot_to_json(&tracker.export())?;
//! ```

pub mod defaults;
pub mod error;
pub mod records;
pub mod repository;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod types;
pub mod wal;

// Re-exports
pub use error::{ErrorKind, Result, StoreError};
pub use records::{Collection, RecordKey};
pub use repository::Repository;
pub use snapshot::{
    backup_file_name, export_snapshot, import_file, import_json, snapshot_to_json, write_backup,
    ImportOutcome, SnapshotSection, SNAPSHOT_VERSION,
};
pub use state::{apply_update, Cache, CacheUpdate, LoadState, Progress, Tracker};
pub use store::{RecordStore, StoreConfig, StoreStats};
pub use types::*;
pub use wal::{WalEntry, WalEntryStatus, WalOperation, WriteAheadLog};
