//! Framed collection file.
//!
//! Layout: magic, version, body length (u64 LE), JSON body, CRC32 of the
//! body. Writes go to a temporary sibling that is fsynced and renamed over
//! the live file, so readers only ever see a complete old or new file.

use super::collection::{RecordKey, Records};
use crate::error::{Result, StoreError};
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Magic bytes for collection files.
const COLLECTION_MAGIC: &[u8; 4] = b"COL\0";

/// Current collection format version.
const COLLECTION_VERSION: u8 = 1;

/// Refuse bodies larger than this when reading.
const MAX_BODY_LEN: u64 = 256 * 1024 * 1024;

/// One collection's file on disk.
pub struct CollectionFile {
    path: PathBuf,
}

impl CollectionFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all records. A missing file is an empty collection.
    pub fn read(&self) -> Result<Records> {
        if !self.path.exists() {
            return Ok(Records::new());
        }

        let mut file = File::open(&self.path)?;

        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)?;
        if &magic != COLLECTION_MAGIC {
            return Err(StoreError::InvalidFormat(format!(
                "Invalid collection magic in {}",
                self.path.display()
            )));
        }

        let mut version = [0u8; 1];
        file.read_exact(&mut version)?;
        if version[0] != COLLECTION_VERSION {
            return Err(StoreError::InvalidFormat(format!(
                "Unsupported collection version: {}",
                version[0]
            )));
        }

        let mut len_bytes = [0u8; 8];
        file.read_exact(&mut len_bytes)?;
        let len = u64::from_le_bytes(len_bytes);
        if len > MAX_BODY_LEN {
            return Err(StoreError::Corruption("Collection body too large".into()));
        }

        let mut body = vec![0u8; len as usize];
        file.read_exact(&mut body)?;

        let mut checksum_bytes = [0u8; 4];
        file.read_exact(&mut checksum_bytes)?;
        let expected = u32::from_le_bytes(checksum_bytes);
        let got = crc32fast::hash(&body);
        if expected != got {
            return Err(StoreError::ChecksumMismatch { expected, got });
        }

        let entries: Vec<(RecordKey, Value)> = serde_json::from_slice(&body)
            .map_err(|e| StoreError::Deserialization(e.to_string()))?;

        Ok(entries.into_iter().collect())
    }

    /// Replace the file contents with `records`.
    pub fn write(&self, records: &Records) -> Result<()> {
        let entries: Vec<(&RecordKey, &Value)> = records.iter().collect();
        let body = serde_json::to_vec(&entries)?;

        let tmp_path = self.path.with_extension("tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&tmp_path)?;

            file.write_all(COLLECTION_MAGIC)?;
            file.write_all(&[COLLECTION_VERSION])?;
            file.write_all(&(body.len() as u64).to_le_bytes())?;
            file.write_all(&body)?;
            file.write_all(&crc32fast::hash(&body).to_le_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&tmp_path, &self.path)?;
        sync_parent(&self.path)?;
        Ok(())
    }
}

/// Persist the directory entry after a rename.
#[cfg(unix)]
fn sync_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        File::open(parent)?.sync_all()?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) -> Result<()> {
    Ok(())
}
