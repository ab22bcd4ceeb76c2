//! Persisted language preference
//!
//! The user's explicit language choice lives under a single fixed key in
//! durable per-origin key-value storage. It is read once at startup and only
//! written by the language selector's change handler.

use crate::config::Config;
use crate::error::{StorageError, StorageResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the file backing [`FileStorage`]
const STORAGE_FILE_NAME: &str = "local_storage.json";

/// Durable string key-value storage
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }
}

/// Durable storage for `config`, or process-local storage when none is available
pub fn open_storage(config: &Config) -> Box<dyn KeyValueStorage> {
    durable_or_memory(FileStorage::from_config(config))
}

fn durable_or_memory(durable: StorageResult<FileStorage>) -> Box<dyn KeyValueStorage> {
    match durable {
        Ok(storage) => {
            log::debug!("Language preference stored in {}", storage.path().display());
            Box::new(storage)
        }
        Err(e) => {
            log::warn!("{}; language choice will not survive this run", e);
            Box::new(MemoryStorage::new())
        }
    }
}

/// Storage kept in a JSON object file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage file inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STORAGE_FILE_NAME))
    }

    /// Storage in the configured directory, or the user data directory
    pub fn from_config(config: &Config) -> StorageResult<Self> {
        let dir = config
            .storage_dir()
            .map_err(|_| StorageError::DirectoryError)?;
        Ok(Self::in_dir(&dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StorageResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|source| StorageError::ReadError {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_str(&content).map_err(|source| StorageError::ParseError {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> StorageResult<()> {
        let write_error = |source| StorageError::WriteError {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }

        let content = serde_json::to_string_pretty(items)
            .map_err(|e| write_error(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

        // Write to a sibling temp file, then rename over the target
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content).map_err(write_error)?;
        std::fs::rename(&temp_path, &self.path).map_err(write_error)
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        // A corrupt file is replaced rather than blocking the write
        let mut items = match self.read_all() {
            Ok(items) => items,
            Err(e @ StorageError::ParseError { .. }) => {
                log::warn!("Discarding corrupt storage: {}", e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }
}

/// Process-local storage for hosts without durable storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The saved language choice, bound to its storage key
///
/// Storage faults are logged and contained: a failed read counts as no
/// preference, a failed write leaves the previous value in place.
#[derive(Debug, Clone)]
pub struct PreferenceStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> PreferenceStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> Option<String> {
        match self.storage.get_item(&self.key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                log::warn!("Failed to read saved language: {}", e);
                None
            }
        }
    }

    pub fn set(&mut self, locale: &str) {
        match self.storage.set_item(&self.key, locale) {
            Ok(()) => log::debug!("Saved language preference {}", locale),
            Err(e) => log::error!("Failed to save language preference: {}", e),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
