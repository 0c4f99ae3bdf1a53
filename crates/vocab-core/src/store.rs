use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// The three durable records of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    ThemePreference,
    SearchHistory,
    Bookmarks,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::ThemePreference => "theme-preference",
            StoreKey::SearchHistory => "search-history",
            StoreKey::Bookmarks => "bookmarks",
        }
    }
}

/// Raw string key-value backend
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a profile directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!("Opened file store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(tmp, path)?;
        Ok(())
    }
}

/// In-process backend, nothing survives the process
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed raw values, corrupted ones included
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed JSON access over a [`KeyValueStore`].
///
/// Cloning is cheap; every manager holds its own handle to the same backend.
#[derive(Clone)]
pub struct PersistentStore {
    backend: Arc<dyn KeyValueStore>,
}

impl PersistentStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Load `key`, or `default()` when it is absent or unreadable.
    ///
    /// A value that is not UTF-8 or fails to deserialize is logged,
    /// overwritten with the default and never reported to the caller.
    pub fn load<T, F>(&self, key: StoreKey, default: F) -> T
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        let parsed = match self.backend.get(key.as_str()) {
            Ok(Some(raw)) => serde_json::from_str::<T>(&raw).map_err(|e| e.to_string()),
            Ok(None) => return default(),
            // Non-UTF-8 content
            Err(StoreError::IoError(e)) if e.kind() == ErrorKind::InvalidData => {
                Err(e.to_string())
            }
            Err(e) => {
                tracing::warn!(key = key.as_str(), "Failed to read stored value: {e}");
                return default();
            }
        };

        match parsed {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    key = key.as_str(),
                    "Stored value is corrupted, resetting to default: {e}"
                );
                let value = default();
                if let Err(e) = self.save(key, &value) {
                    tracing::error!(key = key.as_str(), "Failed to reset corrupted value: {e}");
                }
                value
            }
        }
    }

    pub fn save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.backend.set(key.as_str(), &json)?;
        tracing::trace!(key = key.as_str(), "Persisted {} bytes", json.len());
        Ok(())
    }

    /// Raw stored text, for diagnostics and tests
    pub fn raw(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        self.backend.get(key.as_str())
    }
}
