//! Write-Ahead Log for crash recovery.
//!
//! Every collection mutation is written here before it touches a collection
//! file. On open, operations without a commit or rollback marker are
//! replayed. All operations are idempotent, so replaying one that already
//! reached disk is harmless.

use crate::error::{Result, StoreError};
use crate::records::{Collection, RecordKey};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Magic bytes for WAL file.
const WAL_MAGIC: &[u8; 4] = b"WAL\0";

/// Current WAL format version.
const WAL_VERSION: u8 = 1;

/// Header size (magic + version).
const WAL_HEADER_LEN: u64 = 5;

/// WAL entry status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalEntryStatus {
    /// Entry has been written but not yet applied.
    Pending,
    /// Entry has been applied to the collection files.
    Committed,
    /// Applying the entry failed; it must not be replayed.
    RolledBack,
}

/// A single WAL entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalEntry {
    /// Sequence number of the operation this entry belongs to.
    pub seq: u64,
    pub status: WalEntryStatus,
    pub operation: WalOperation,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
}

/// Operations that can be recorded in the WAL.
///
/// Record payloads are JSON-encoded bytes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WalOperation {
    /// Upsert one record.
    Put {
        collection: Collection,
        key: RecordKey,
        record: Vec<u8>,
    },
    /// Remove one record if present.
    Delete {
        collection: Collection,
        key: RecordKey,
    },
    /// Swap the whole collection for `records` (JSON list of key/record pairs).
    ReplaceAll {
        collection: Collection,
        records: Vec<u8>,
    },
    /// Empty one collection.
    Clear { collection: Collection },
    /// Empty every collection.
    ClearAll,
    /// Status marker for an earlier entry.
    Marker,
}

impl WalOperation {
    /// Collections an operation modifies.
    pub fn targets(&self) -> Vec<Collection> {
        match self {
            WalOperation::Put { collection, .. }
            | WalOperation::Delete { collection, .. }
            | WalOperation::ReplaceAll { collection, .. }
            | WalOperation::Clear { collection } => vec![*collection],
            WalOperation::ClearAll => Collection::ALL.to_vec(),
            WalOperation::Marker => Vec::new(),
        }
    }
}

/// Write-Ahead Log manager.
pub struct WriteAheadLog {
    path: PathBuf,
    next_seq: Mutex<u64>,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl WriteAheadLog {
    /// Create or open a WAL file.
    ///
    /// A torn entry at the tail (crash mid-write) is truncated away.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let next_seq = if path.exists() {
            let file = OpenOptions::new().read(true).write(true).open(&path)?;
            let mut reader = BufReader::new(file);

            let mut magic = [0u8; 4];
            reader.read_exact(&mut magic)?;
            if &magic != WAL_MAGIC {
                return Err(StoreError::InvalidFormat("Invalid WAL magic".into()));
            }

            let mut version = [0u8; 1];
            reader.read_exact(&mut version)?;
            if version[0] != WAL_VERSION {
                return Err(StoreError::InvalidFormat(format!(
                    "Unsupported WAL version: {}",
                    version[0]
                )));
            }

            let mut max_seq = 0u64;
            let mut valid_end = WAL_HEADER_LEN;
            while let Ok(entry) = Self::read_entry(&mut reader) {
                max_seq = max_seq.max(entry.seq);
                valid_end = reader.stream_position()?;
            }

            let file = reader.into_inner();
            if file.metadata()?.len() > valid_end {
                tracing::warn!(path = %path.display(), valid_end, "truncating torn WAL tail");
                file.set_len(valid_end)?;
                file.sync_all()?;
            }

            max_seq + 1
        } else {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&path)?;

            file.write_all(WAL_MAGIC)?;
            file.write_all(&[WAL_VERSION])?;
            file.sync_all()?;

            1
        };

        let writer = BufWriter::new(OpenOptions::new().append(true).open(&path)?);

        Ok(Self {
            path,
            next_seq: Mutex::new(next_seq),
            writer: Mutex::new(Some(writer)),
        })
    }

    /// Log an operation (returns sequence number).
    pub fn log(&self, operation: WalOperation) -> Result<u64> {
        let mut next_seq = self.next_seq.lock();
        let seq = *next_seq;

        self.append(WalEntry {
            seq,
            status: WalEntryStatus::Pending,
            operation,
            timestamp: now_secs(),
        })?;

        *next_seq += 1;
        Ok(seq)
    }

    /// Mark an entry as applied.
    pub fn commit(&self, seq: u64) -> Result<()> {
        self.mark(seq, WalEntryStatus::Committed)
    }

    /// Mark an entry as abandoned.
    pub fn rollback(&self, seq: u64) -> Result<()> {
        self.mark(seq, WalEntryStatus::RolledBack)
    }

    /// Sequence number the next logged operation will receive.
    pub fn next_seq(&self) -> u64 {
        *self.next_seq.lock()
    }

    /// Get all pending entries, ordered by sequence number.
    pub fn get_pending_entries(&self) -> Result<Vec<WalEntry>> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(WAL_HEADER_LEN))?;

        let mut reader = BufReader::new(file);
        let mut entries = HashMap::new();
        let mut resolved = HashSet::new();

        while let Ok(entry) = Self::read_entry(&mut reader) {
            match entry.status {
                WalEntryStatus::Pending => {
                    entries.insert(entry.seq, entry);
                }
                WalEntryStatus::Committed | WalEntryStatus::RolledBack => {
                    resolved.insert(entry.seq);
                }
            }
        }

        let mut pending: Vec<_> = entries
            .into_iter()
            .filter(|(seq, _)| !resolved.contains(seq))
            .map(|(_, entry)| entry)
            .collect();
        pending.sort_by_key(|entry| entry.seq);

        Ok(pending)
    }

    /// Clear the WAL (called once nothing is pending).
    pub fn clear(&self) -> Result<()> {
        let mut writer = self.writer.lock();
        *writer = None;

        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)?;

        file.write_all(WAL_MAGIC)?;
        file.write_all(&[WAL_VERSION])?;
        file.sync_all()?;

        *writer = Some(BufWriter::new(
            OpenOptions::new().append(true).open(&self.path)?,
        ));

        *self.next_seq.lock() = 1;

        Ok(())
    }

    /// Check if WAL has any pending entries.
    pub fn has_pending(&self) -> Result<bool> {
        Ok(!self.get_pending_entries()?.is_empty())
    }

    /// Drop the append handle so the next append fails.
    #[cfg(test)]
    pub(crate) fn detach_writer(&self) {
        *self.writer.lock() = None;
    }

    fn mark(&self, seq: u64, status: WalEntryStatus) -> Result<()> {
        self.append(WalEntry {
            seq,
            status,
            operation: WalOperation::Marker,
            timestamp: now_secs(),
        })
    }

    fn append(&self, entry: WalEntry) -> Result<()> {
        let mut writer = self.writer.lock();
        match writer.as_mut() {
            Some(w) => {
                Self::write_entry(w, &entry)?;
                w.flush()?;
                w.get_ref().sync_all()?;
                Ok(())
            }
            None => Err(StoreError::NotInitialized),
        }
    }

    fn write_entry(writer: &mut BufWriter<File>, entry: &WalEntry) -> Result<()> {
        let encoded = rmp_serde::to_vec(entry)?;

        let len = encoded.len() as u32;
        writer.write_all(&len.to_le_bytes())?;
        writer.write_all(&encoded)?;

        let checksum = crc32fast::hash(&encoded);
        writer.write_all(&checksum.to_le_bytes())?;

        Ok(())
    }

    fn read_entry(reader: &mut BufReader<File>) -> Result<WalEntry> {
        let mut len_bytes = [0u8; 4];
        reader.read_exact(&mut len_bytes)?;
        let len = u32::from_le_bytes(len_bytes) as usize;

        if len > 256 * 1024 * 1024 {
            return Err(StoreError::Corruption("WAL entry too large".into()));
        }

        let mut encoded = vec![0u8; len];
        reader.read_exact(&mut encoded)?;

        let mut checksum_bytes = [0u8; 4];
        reader.read_exact(&mut checksum_bytes)?;
        let stored_checksum = u32::from_le_bytes(checksum_bytes);

        let computed_checksum = crc32fast::hash(&encoded);
        if stored_checksum != computed_checksum {
            return Err(StoreError::Corruption("WAL checksum mismatch".into()));
        }

        Ok(rmp_serde::from_slice(&encoded)?)
    }
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
