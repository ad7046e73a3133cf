use crate::error::PersistError;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// The three independently keyed records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Signals,
    Switches,
    Plans,
}

impl RecordKey {
    pub const ALL: [RecordKey; 3] = [RecordKey::Signals, RecordKey::Switches, RecordKey::Plans];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKey::Signals => "signals",
            RecordKey::Switches => "switches",
            RecordKey::Plans => "plans",
        }
    }

    fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

pub trait Persistence: Send + Sync {
    /// `Ok(None)` means the record was never written.
    fn load(&self, key: RecordKey) -> Result<Option<String>, PersistError>;
    fn save(&self, key: RecordKey, contents: &str) -> Result<(), PersistError>;
}

/// One JSON file per record inside a data directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: RecordKey) -> PathBuf {
        self.dir.join(key.file_name())
    }
}

impl Persistence for JsonFileStore {
    fn load(&self, key: RecordKey) -> Result<Option<String>, PersistError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: RecordKey, contents: &str) -> Result<(), PersistError> {
        let path = self.path_for(key);
        // Write to a sibling temp file, then rename over the record.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| PersistError::Io(e.error))?;
        Ok(())
    }
}

/// Non-durable backend for tests and `LIFESWITCH_STORAGE=memory`.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<RecordKey, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(self, key: RecordKey, contents: impl Into<String>) -> Self {
        if let Ok(mut records) = self.records.lock() {
            records.insert(key, contents.into());
        }
        self
    }

    /// Makes every subsequent `save` fail until switched back.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Persistence for MemoryStore {
    fn load(&self, key: RecordKey) -> Result<Option<String>, PersistError> {
        let records = self.records.lock().map_err(|_| PersistError::Unavailable)?;
        Ok(records.get(&key).cloned())
    }

    fn save(&self, key: RecordKey, contents: &str) -> Result<(), PersistError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistError::Unavailable);
        }
        let mut records = self.records.lock().map_err(|_| PersistError::Unavailable)?;
        records.insert(key, contents.to_string());
        Ok(())
    }
}

/// Reads a record, substituting defaults when it is absent or unreadable.
/// A corrupt record is overwritten on the next successful save.
pub fn load_record<T>(backend: &dyn Persistence, key: RecordKey) -> T
where
    T: DeserializeOwned + Default,
{
    match backend.load(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Corrupt {} record, using defaults: {}", key.as_str(), e);
                T::default()
            }
        },
        Ok(None) => {
            tracing::debug!("No {} record yet, using defaults", key.as_str());
            T::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read {} record, using defaults: {}", key.as_str(), e);
            T::default()
        }
    }
}

pub fn save_record<T: Serialize>(
    backend: &dyn Persistence,
    key: RecordKey,
    value: &T,
) -> Result<(), PersistError> {
    let encoded = serde_json::to_string_pretty(value)?;
    backend.save(key, &encoded)
}
