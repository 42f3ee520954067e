//! Key-value storage port
//!
//! The upload store depends on this capability rather than a concrete
//! backend. `FileStorage` keeps one JSON document per key on disk;
//! `MemoryStorage` backs tests.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous key-value storage
pub trait StoragePort: Send + Sync {
    /// Read a value; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a value
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed storage: key `k` lives at `<root>/k.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path backing a key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl StoragePort for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to a sibling temp file, then rename over the target
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

/// In-memory storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Concrete storage enum
///
/// Wraps every backend so callers hold one sized type.
#[derive(Debug)]
pub enum Storage {
    File(FileStorage),
    Memory(MemoryStorage),
}

impl StoragePort for Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Storage::File(s) => s.get(key),
            Storage::Memory(s) => s.get(key),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Storage::File(s) => s.put(key, value),
            Storage::Memory(s) => s.put(key, value),
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Storage::Memory(MemoryStorage::new())
    }
}
