use vocab_types::{Bookmark, DisplayResult, LookupOutcome, LookupTicket};

use crate::bookmarks::BookmarkManager;
use crate::error::{LookupError, StoreError};
use crate::history::HistoryManager;
use crate::lookup::{Completion, LookupResult, LookupSession};
use crate::store::PersistentStore;
use crate::theme::{Theme, ThemeManager};

/// Single owner of everything the user sees: history, bookmarks, theme,
/// the lookup session and the currently selected word.
///
/// Every mutation updates memory and writes through to the store before
/// returning.
pub struct DictionaryState {
    history: HistoryManager,
    bookmarks: BookmarkManager,
    theme: ThemeManager,
    lookup: LookupSession,
    current_word: Option<String>,
}

impl DictionaryState {
    pub fn open(store: PersistentStore, system_dark: bool) -> Self {
        Self {
            history: HistoryManager::load(store.clone()),
            bookmarks: BookmarkManager::load(store.clone()),
            theme: ThemeManager::load(store, system_dark),
            lookup: LookupSession::new(),
            current_word: None,
        }
    }

    /// Start a lookup; the ticket's word becomes the current word
    pub fn begin_lookup(&mut self, input: &str) -> Result<LookupTicket, LookupError> {
        let ticket = self.lookup.begin(input)?;
        self.current_word = Some(ticket.word.clone());
        Ok(ticket)
    }

    /// Apply a finished lookup. Only a successful, non-stale lookup touches history.
    pub fn finish_lookup(
        &mut self,
        ticket: &LookupTicket,
        outcome: LookupOutcome,
    ) -> Result<Completion, StoreError> {
        let completion = self.lookup.complete(ticket, outcome);
        if let Completion::Succeeded { word } = &completion {
            self.history.record(word)?;
        }
        Ok(completion)
    }

    /// Toggle the current word; `None` when nothing is selected
    pub fn toggle_bookmark(&mut self) -> Result<Option<bool>, StoreError> {
        match self.current_word.clone() {
            Some(word) => self.bookmarks.toggle(&word).map(Some),
            None => Ok(None),
        }
    }

    pub fn toggle_bookmark_word(&mut self, word: &str) -> Result<bool, StoreError> {
        self.bookmarks.toggle(word)
    }

    pub fn clear_history(&mut self) -> Result<(), StoreError> {
        self.history.clear()
    }

    pub fn clear_bookmarks(&mut self) -> Result<(), StoreError> {
        self.bookmarks.clear()
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        self.theme.toggle()
    }

    /// Make a history entry the current word without searching it
    pub fn select_history(&mut self, index: usize) -> Option<&str> {
        let word = self.history.entry(index)?.to_string();
        self.current_word = Some(word);
        self.current_word.as_deref()
    }

    /// Make a bookmarked word the current word without searching it
    pub fn select_bookmark(&mut self, index: usize) -> Option<&str> {
        let word = self.bookmarks.entry(index)?.word.clone();
        self.current_word = Some(word);
        self.current_word.as_deref()
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }

    pub fn is_current_bookmarked(&self) -> bool {
        self.current_word
            .as_deref()
            .is_some_and(|word| self.bookmarks.is_bookmarked(word))
    }

    pub fn is_bookmarked(&self, word: &str) -> bool {
        self.bookmarks.is_bookmarked(word)
    }

    pub fn history(&self) -> &[String] {
        self.history.get()
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        self.bookmarks.get()
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn is_loading(&self) -> bool {
        self.lookup.is_loading()
    }

    pub fn result(&self) -> Option<&LookupResult> {
        self.lookup.result()
    }

    /// Latest result shaped for the presentation layer
    pub fn display_result(&self) -> Option<DisplayResult> {
        self.lookup.result().map(|result| DisplayResult {
            word: result.word.clone(),
            text: result.text.clone(),
            is_error: result.is_error(),
            bookmarked: self.bookmarks.is_bookmarked(&result.word),
        })
    }
}
