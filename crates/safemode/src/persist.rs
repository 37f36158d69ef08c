//! Persistence backends for the configuration record.

use crate::record::ConfigRecord;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record serialization/deserialization error
    #[error("Record encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// The narrow interface the subsystem needs from its persistence medium.
///
/// The record must be replaced atomically as a whole; readers racing a
/// `store` may observe either the old or the new record, never a partial
/// one.
pub trait RecordStore: Send + Sync {
    /// Load the current record, `None` if none is stored.
    fn load(&self) -> Result<Option<ConfigRecord>, StoreError>;

    /// Overwrite the record wholesale.
    fn store(&self, record: &ConfigRecord) -> Result<(), StoreError>;

    /// Remove the record. Removing an absent record is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}

/// File-backed record store, one JSON document per record.
///
/// Writes go to a sibling temp file followed by a rename, so a crash
/// mid-write leaves either the old record or the new one on disk.
#[derive(Debug)]
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    /// Create a store persisting at `path`. The parent directory must
    /// exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the persisted record.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl RecordStore for FileRecordStore {
    fn load(&self) -> Result<Option<ConfigRecord>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    fn store(&self, record: &ConfigRecord) -> Result<(), StoreError> {
        let tmp = self.tmp_path();
        let content = serde_json::to_vec(record)?;
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory record store for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    slot: Mutex<Option<ConfigRecord>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<ConfigRecord>> {
        // A panic while holding this lock cannot leave a half-written
        // record, so recover from poisoning instead of propagating it.
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self) -> Result<Option<ConfigRecord>, StoreError> {
        Ok(self.slot().clone())
    }

    fn store(&self, record: &ConfigRecord) -> Result<(), StoreError> {
        *self.slot() = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot() = None;
        Ok(())
    }
}
