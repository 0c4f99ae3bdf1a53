use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// Sent by the lookup task back into the event loop
    LookupFinished {
        ticket: LookupTicket,
        outcome: LookupOutcome,
    },
    BackendReady {
        dark_mode: bool,
    },
    LookupStarted {
        word: String,
    },
    ShowResult(DisplayResult),
    ShowHistory(Vec<String>),
    ShowBookmarks(Vec<Bookmark>),
    CurrentWord {
        word: Option<String>,
        bookmarked: bool,
    },
    ThemeChanged {
        dark_mode: bool,
    },
    Notice(String),
    /// Last event of the event loop after a close request
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SearchText(String),
    /// Search whatever word is currently selected
    SearchCurrent,
    ToggleBookmark,
    ShowHistory,
    ShowBookmarks,
    SelectHistory(usize),
    SelectBookmark(usize),
    ClearHistory,
    ClearBookmarks,
    ToggleTheme,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayResult {
    pub word: String,
    pub text: String,
    pub is_error: bool,
    pub bookmarked: bool,
}

/// Identifies one accepted lookup request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupTicket {
    pub id: u64,
    pub word: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Definition(String),
    /// Diagnostic reason, never shown to the user as-is
    Failed(String),
}

/// A saved word. Serialized as `{ "word": ..., "date": ... }` with an RFC 3339 date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub word: String,
    pub date: DateTime<Utc>,
}

impl Bookmark {
    pub fn new(word: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            word: word.into(),
            date,
        }
    }
}
