use chrono::{DateTime, Utc};
use vocab_types::Bookmark;

use crate::error::StoreError;
use crate::store::{PersistentStore, StoreKey};

/// Saved words keyed by exact spelling, most recently added first
pub struct BookmarkManager {
    store: PersistentStore,
    bookmarks: Vec<Bookmark>,
}

impl BookmarkManager {
    pub fn load(store: PersistentStore) -> Self {
        let stored: Vec<Bookmark> = store.load(StoreKey::Bookmarks, Vec::new);

        let mut bookmarks: Vec<Bookmark> = Vec::with_capacity(stored.len());
        for bookmark in stored {
            if !bookmarks.iter().any(|b| b.word == bookmark.word) {
                bookmarks.push(bookmark);
            }
        }
        tracing::debug!("Loaded {} bookmarks", bookmarks.len());

        Self { store, bookmarks }
    }

    /// Add or remove `word`, returning whether it is bookmarked afterwards.
    /// An empty word changes nothing.
    pub fn toggle(&mut self, word: &str) -> Result<bool, StoreError> {
        self.toggle_at(word, Utc::now())
    }

    pub fn toggle_at(&mut self, word: &str, now: DateTime<Utc>) -> Result<bool, StoreError> {
        if word.is_empty() {
            return Ok(false);
        }

        let bookmarked = if let Some(pos) = self.position(word) {
            self.bookmarks.remove(pos);
            tracing::debug!("Removed bookmark '{word}'");
            false
        } else {
            self.bookmarks.insert(0, Bookmark::new(word, now));
            tracing::debug!("Bookmarked '{word}'");
            true
        };

        self.persist()?;
        Ok(bookmarked)
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.bookmarks.clear();
        self.persist()
    }

    pub fn is_bookmarked(&self, word: &str) -> bool {
        self.position(word).is_some()
    }

    pub fn get(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn entry(&self, index: usize) -> Option<&Bookmark> {
        self.bookmarks.get(index)
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    fn position(&self, word: &str) -> Option<usize> {
        self.bookmarks.iter().position(|b| b.word == word)
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save(StoreKey::Bookmarks, &self.bookmarks)
    }
}
