//! The record store: named JSON record collections with atomic writes.

use crate::error::{Result, StoreError};
use crate::records::{Collection, CollectionFile, KeyPath, RecordKey, Records};
use crate::wal::{WalOperation, WriteAheadLog};
use fs2::FileExt;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use tracing::{debug, error, info, warn};

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Base path for the store.
    pub path: PathBuf,

    /// Whether to create the store if it doesn't exist.
    pub create_if_missing: bool,

    /// Truncate the WAL after this many logged operations.
    pub checkpoint_every: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let path = dirs::data_dir()
            .map(|dir| dir.join(DEFAULT_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR_NAME));
        Self {
            path,
            create_if_missing: true,
            checkpoint_every: 256,
        }
    }
}

impl StoreConfig {
    /// Default settings rooted at `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

/// Record counts and on-disk size.
#[derive(Clone, Debug, Default)]
pub struct StoreStats {
    pub record_counts: HashMap<Collection, usize>,
    pub total_size_bytes: u64,
}

impl StoreStats {
    pub fn total_records(&self) -> usize {
        self.record_counts.values().sum()
    }
}

/// Directory name used under the platform data directory.
const DEFAULT_DIR_NAME: &str = "n400-companion";

/// Magic bytes for store manifest.
const STORE_MAGIC: &[u8; 4] = b"NPC\0";

/// Current store format version.
const STORE_VERSION: u8 = 1;

/// Open stores in this process, keyed by canonical path.
fn registry() -> &'static Mutex<HashMap<PathBuf, Weak<RecordStore>>> {
    static REGISTRY: OnceLock<Mutex<HashMap<PathBuf, Weak<RecordStore>>>> = OnceLock::new();
    REGISTRY.get_or_init(Default::default)
}

/// Local persistent store of record collections.
///
/// Reads are served from memory. Every write is logged to the WAL, applied
/// to a staged copy of the affected collections, persisted by atomic file
/// replacement, and only then made visible.
pub struct RecordStore {
    config: StoreConfig,

    /// Lock file for exclusive access.
    lock_file: File,

    wal: WriteAheadLog,

    collections: RwLock<HashMap<Collection, Records>>,

    /// Serializes writers.
    write_lock: Mutex<()>,

    /// Set when a failed write could not be undone on disk.
    needs_recovery: AtomicBool,
}

impl RecordStore {
    /// Open the store at `config.path`, creating it if allowed.
    ///
    /// Memoized: every caller in this process asking for the same path gets
    /// the same handle while any handle is alive.
    pub fn open(config: StoreConfig) -> Result<Arc<Self>> {
        if !config.path.exists() {
            if !config.create_if_missing {
                return Err(StoreError::NotInitialized);
            }
            fs::create_dir_all(&config.path)?;
        }
        let canonical = fs::canonicalize(&config.path)?;

        let mut open_stores = registry().lock();
        if let Some(existing) = open_stores.get(&canonical).and_then(Weak::upgrade) {
            return Ok(existing);
        }

        let store = Arc::new(Self::open_at(StoreConfig {
            path: canonical.clone(),
            ..config
        })?);
        open_stores.retain(|_, handle| handle.strong_count() > 0);
        open_stores.insert(canonical, Arc::downgrade(&store));
        Ok(store)
    }

    fn open_at(config: StoreConfig) -> Result<Self> {
        let root = config.path.clone();
        fs::create_dir_all(root.join("collections"))?;

        if root.join("MANIFEST").exists() {
            Self::verify_manifest(&root)?;
        } else {
            Self::write_manifest(&root)?;
        }

        let lock_file = Self::acquire_lock(&root)?;

        let mut collections = HashMap::new();
        for collection in Collection::ALL {
            let file = Self::collection_file(&root, collection);
            let records = file.read()?;
            if !file.exists() {
                file.write(&records)?;
            }
            collections.insert(collection, records);
        }

        let wal = WriteAheadLog::open(root.join("store.wal"))?;

        let store = Self {
            config,
            lock_file,
            wal,
            collections: RwLock::new(collections),
            write_lock: Mutex::new(()),
            needs_recovery: AtomicBool::new(false),
        };
        store.recover()?;

        info!(path = %root.display(), "record store opened");
        Ok(store)
    }

    /// Replay operations that were logged but never committed.
    fn recover(&self) -> Result<()> {
        let pending = self.wal.get_pending_entries()?;
        if !pending.is_empty() {
            warn!(count = pending.len(), "replaying uncommitted WAL entries");
        }

        for entry in pending {
            let touched = entry.operation.targets();
            let mut staged = self.stage(&touched);
            apply_operation(&mut staged, &entry.operation)?;
            self.persist(&staged)?;
            self.collections.write().extend(staged);
        }

        self.wal.clear()
    }

    // --- Reads ---

    /// Every record in the collection, in key order.
    pub fn get_all(&self, collection: Collection) -> Vec<Value> {
        self.collections
            .read()
            .get(&collection)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get(&self, collection: Collection, key: &RecordKey) -> Option<Value> {
        self.collections
            .read()
            .get(&collection)
            .and_then(|records| records.get(key).cloned())
    }

    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .get(&collection)
            .map_or(0, |records| records.len())
    }

    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }

    // --- Writes ---

    /// Upsert a record keyed by its inline key field. Last write wins.
    pub fn put(&self, collection: Collection, record: Value) -> Result<()> {
        let key = Self::inline_key(collection, &record)?;
        self.put_keyed(collection, key, record)
    }

    /// Upsert a record under an explicit key.
    pub fn put_keyed(&self, collection: Collection, key: RecordKey, record: Value) -> Result<()> {
        self.execute(WalOperation::Put {
            collection,
            key,
            record: serde_json::to_vec(&record)?,
        })
    }

    /// Remove a record. Absent keys are a no-op.
    pub fn delete(&self, collection: Collection, key: &RecordKey) -> Result<()> {
        self.execute(WalOperation::Delete {
            collection,
            key: key.clone(),
        })
    }

    /// Swap the whole collection for `records` as one atomic unit.
    pub fn replace_all(&self, collection: Collection, records: Vec<Value>) -> Result<()> {
        let keyed = records
            .into_iter()
            .map(|record| Ok((Self::inline_key(collection, &record)?, record)))
            .collect::<Result<Vec<_>>>()?;
        self.replace_all_keyed(collection, keyed)
    }

    /// Like [`replace_all`](Self::replace_all) with explicit keys.
    pub fn replace_all_keyed(
        &self,
        collection: Collection,
        records: Vec<(RecordKey, Value)>,
    ) -> Result<()> {
        self.execute(WalOperation::ReplaceAll {
            collection,
            records: serde_json::to_vec(&records)?,
        })
    }

    pub fn clear(&self, collection: Collection) -> Result<()> {
        self.execute(WalOperation::Clear { collection })
    }

    /// Empty every collection. Logged as one operation.
    pub fn clear_all(&self) -> Result<()> {
        self.execute(WalOperation::ClearAll)
    }

    // --- Store Operations ---

    pub fn stats(&self) -> Result<StoreStats> {
        let record_counts = self
            .collections
            .read()
            .iter()
            .map(|(collection, records)| (*collection, records.len()))
            .collect();

        let mut total_size_bytes = fs::metadata(self.config.path.join("store.wal"))?.len();
        for collection in Collection::ALL {
            let file = Self::collection_file(&self.config.path, collection);
            if file.exists() {
                total_size_bytes += fs::metadata(file.path())?.len();
            }
        }

        Ok(StoreStats {
            record_counts,
            total_size_bytes,
        })
    }

    /// Get the store path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// The WAL, exposed for recovery tooling and tests.
    pub fn wal(&self) -> &WriteAheadLog {
        &self.wal
    }

    // --- Private Helpers ---

    fn execute(&self, operation: WalOperation) -> Result<()> {
        let _lock = self.write_lock.lock();
        if self.needs_recovery.load(Ordering::Acquire) {
            return Err(StoreError::NeedsRecovery);
        }

        let seq = self.wal.log(operation.clone())?;
        let touched = operation.targets();
        let original = self.stage(&touched);
        let mut staged = original.clone();
        let mut written = Vec::new();

        let applied = apply_operation(&mut staged, &operation)
            .and_then(|()| self.persist_tracked(&staged, &mut written));
        if let Err(e) = applied {
            self.undo(seq, &original, &written);
            return Err(e);
        }

        self.collections.write().extend(staged);
        self.seal(seq);
        debug!(seq, collections = ?touched, "write committed");

        if seq >= self.config.checkpoint_every {
            debug!(seq, "checkpointing WAL");
            self.wal.clear()?;
        }

        Ok(())
    }

    /// Put back the pre-write contents of every collection file a failed
    /// write already replaced, then mark the entry rolled back.
    ///
    /// If a restore fails the entry stays pending and the store refuses
    /// further writes, so the next open replays it forward.
    fn undo(&self, seq: u64, original: &HashMap<Collection, Records>, written: &[Collection]) {
        let restore: HashMap<Collection, Records> = written
            .iter()
            .filter_map(|c| original.get(c).map(|records| (*c, records.clone())))
            .collect();

        if let Err(restore_err) = self.persist(&restore) {
            self.needs_recovery.store(true, Ordering::Release);
            error!(
                seq,
                error = %restore_err,
                "could not restore collections after failed write; replaying on next open"
            );
            return;
        }
        if !written.is_empty() {
            warn!(seq, restored = ?written, "restored collections after failed write");
        }
        if let Err(rollback_err) = self.wal.rollback(seq) {
            warn!(seq, error = %rollback_err, "failed to mark WAL entry rolled back");
        }
    }

    /// Mark a persisted entry committed.
    ///
    /// The collection files already hold the write, so a failed marker only
    /// costs the log entry: the WAL is truncated instead.
    fn seal(&self, seq: u64) {
        let Err(commit_err) = self.wal.commit(seq) else {
            return;
        };
        warn!(seq, error = %commit_err, "failed to mark WAL entry committed; truncating WAL");
        if let Err(clear_err) = self.wal.clear() {
            warn!(seq, error = %clear_err, "failed to truncate WAL");
        }
    }

    /// Copy the current contents of `collections` for modification.
    fn stage(&self, collections: &[Collection]) -> HashMap<Collection, Records> {
        let current = self.collections.read();
        collections
            .iter()
            .map(|c| (*c, current.get(c).cloned().unwrap_or_default()))
            .collect()
    }

    fn persist(&self, staged: &HashMap<Collection, Records>) -> Result<()> {
        self.persist_tracked(staged, &mut Vec::new())
    }

    /// Write every staged collection, recording each file replaced.
    fn persist_tracked(
        &self,
        staged: &HashMap<Collection, Records>,
        written: &mut Vec<Collection>,
    ) -> Result<()> {
        for (collection, records) in staged {
            Self::collection_file(&self.config.path, *collection).write(records)?;
            written.push(*collection);
        }
        Ok(())
    }

    fn inline_key(collection: Collection, record: &Value) -> Result<RecordKey> {
        match collection.key_path() {
            KeyPath::Inline(field) => collection.key_of(record).ok_or_else(|| {
                StoreError::InvalidOperation(format!(
                    "record in {} has no usable '{}' key",
                    collection, field
                ))
            }),
            KeyPath::OutOfLine => Err(StoreError::InvalidOperation(format!(
                "{} records need an explicit key",
                collection
            ))),
        }
    }

    fn collection_file(root: &Path, collection: Collection) -> CollectionFile {
        CollectionFile::new(
            root.join("collections")
                .join(format!("{}.col", collection.name())),
        )
    }

    fn write_manifest(path: &Path) -> Result<()> {
        use std::io::Write;

        let mut file = File::create(path.join("MANIFEST"))?;
        file.write_all(STORE_MAGIC)?;
        file.write_all(&[STORE_VERSION])?;
        file.sync_all()?;

        Ok(())
    }

    fn verify_manifest(path: &Path) -> Result<()> {
        use std::io::Read;

        let mut file = File::open(path.join("MANIFEST"))?;

        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)?;
        if &magic != STORE_MAGIC {
            return Err(StoreError::InvalidFormat("Invalid store magic".into()));
        }

        let mut version = [0u8; 1];
        file.read_exact(&mut version)?;
        if version[0] != STORE_VERSION {
            return Err(StoreError::InvalidFormat(format!(
                "Unsupported store version: {}",
                version[0]
            )));
        }

        Ok(())
    }

    fn acquire_lock(path: &Path) -> Result<File> {
        let lock_file = File::create(path.join("LOCK"))?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| StoreError::Locked)?;

        Ok(lock_file)
    }
}

impl Drop for RecordStore {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.lock_file);
    }
}

/// Apply a logged operation to staged collections.
fn apply_operation(
    staged: &mut HashMap<Collection, Records>,
    operation: &WalOperation,
) -> Result<()> {
    match operation {
        WalOperation::Put {
            collection,
            key,
            record,
        } => {
            let value: Value = serde_json::from_slice(record)
                .map_err(|e| StoreError::Deserialization(e.to_string()))?;
            staged.entry(*collection).or_default().insert(key.clone(), value);
        }
        WalOperation::Delete { collection, key } => {
            staged.entry(*collection).or_default().remove(key);
        }
        WalOperation::ReplaceAll {
            collection,
            records,
        } => {
            let entries: Vec<(RecordKey, Value)> = serde_json::from_slice(records)
                .map_err(|e| StoreError::Deserialization(e.to_string()))?;
            staged.insert(*collection, entries.into_iter().collect());
        }
        WalOperation::Clear { collection } => {
            staged.insert(*collection, Records::new());
        }
        WalOperation::ClearAll => {
            for collection in Collection::ALL {
                staged.insert(collection, Records::new());
            }
        }
        WalOperation::Marker => {}
    }
    Ok(())
}
