use crate::error::StoreError;
use crate::store::{PersistentStore, StoreKey};

pub const MAX_HISTORY: usize = 10;

/// Most-recent-first list of searched words, no duplicates, at most [`MAX_HISTORY`]
pub struct HistoryManager {
    store: PersistentStore,
    entries: Vec<String>,
}

impl HistoryManager {
    pub fn load(store: PersistentStore) -> Self {
        let stored: Vec<String> = store.load(StoreKey::SearchHistory, Vec::new);
        let entries = normalize(stored);
        tracing::debug!("Loaded {} history entries", entries.len());

        Self { store, entries }
    }

    /// Move `word` to the front, dropping the oldest entries past the limit.
    ///
    /// The in-memory list is always updated; the error only reports a failed write.
    pub fn record(&mut self, word: &str) -> Result<(), StoreError> {
        self.entries.retain(|entry| entry != word);
        self.entries.insert(0, word.to_string());
        self.entries.truncate(MAX_HISTORY);
        self.persist()
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.persist()
    }

    pub fn get(&self) -> &[String] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save(StoreKey::SearchHistory, &self.entries)
    }
}

/// Hand-edited files may break the invariants; first occurrence wins
fn normalize(stored: Vec<String>) -> Vec<String> {
    let mut entries: Vec<String> = Vec::with_capacity(stored.len().min(MAX_HISTORY));
    for word in stored {
        if entries.len() == MAX_HISTORY {
            break;
        }
        if !entries.contains(&word) {
            entries.push(word);
        }
    }
    entries
}
