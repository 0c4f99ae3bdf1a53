use vocab_types::{LookupOutcome, LookupTicket};

use crate::error::LookupError;
use crate::preprocess::{DefaultPreprocessor, Preprocessor};

/// Shown in place of a definition whenever the service call fails
pub const LOOKUP_ERROR_MESSAGE: &str = "Error fetching data. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupState {
    Idle,
    Loading(LookupTicket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Definition,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub word: String,
    pub text: String,
    pub kind: ResultKind,
}

impl LookupResult {
    pub fn is_error(&self) -> bool {
        self.kind == ResultKind::Error
    }
}

/// What [`LookupSession::complete`] did with an outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Succeeded { word: String },
    Failed { word: String },
    /// The ticket is not the one in flight, outcome dropped
    Stale,
}

/// One lookup at a time: `idle -> loading -> idle`.
///
/// A request made while loading is rejected with [`LookupError::Busy`].
/// Tickets increase monotonically and an outcome is only applied for the
/// ticket currently in flight.
pub struct LookupSession {
    state: LookupState,
    next_id: u64,
    result: Option<LookupResult>,
    preprocessor: DefaultPreprocessor,
}

impl Default for LookupSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupSession {
    pub fn new() -> Self {
        Self {
            state: LookupState::Idle,
            next_id: 1,
            result: None,
            preprocessor: DefaultPreprocessor,
        }
    }

    pub fn begin(&mut self, input: &str) -> Result<LookupTicket, LookupError> {
        let word = self.preprocessor.process(input);
        if word.is_empty() {
            return Err(LookupError::EmptyInput);
        }

        if let LookupState::Loading(current) = &self.state {
            return Err(LookupError::Busy {
                word: current.word.clone(),
            });
        }

        let ticket = LookupTicket {
            id: self.next_id,
            word,
        };
        self.next_id += 1;
        self.result = None;
        self.state = LookupState::Loading(ticket.clone());
        tracing::debug!("Lookup #{} started for '{}'", ticket.id, ticket.word);

        Ok(ticket)
    }

    pub fn complete(&mut self, ticket: &LookupTicket, outcome: LookupOutcome) -> Completion {
        match &self.state {
            LookupState::Loading(current) if current == ticket => {}
            _ => {
                tracing::debug!("Discarding stale lookup #{} for '{}'", ticket.id, ticket.word);
                return Completion::Stale;
            }
        }
        self.state = LookupState::Idle;

        let word = ticket.word.clone();
        match outcome {
            LookupOutcome::Definition(text) => {
                self.result = Some(LookupResult {
                    word: word.clone(),
                    text,
                    kind: ResultKind::Definition,
                });
                Completion::Succeeded { word }
            }
            LookupOutcome::Failed(reason) => {
                tracing::warn!("Lookup for '{word}' failed: {reason}");
                self.result = Some(LookupResult {
                    word: word.clone(),
                    text: LOOKUP_ERROR_MESSAGE.to_string(),
                    kind: ResultKind::Error,
                });
                Completion::Failed { word }
            }
        }
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LookupState::Loading(_))
    }

    pub fn result(&self) -> Option<&LookupResult> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(text: &str) -> LookupOutcome {
        LookupOutcome::Definition(text.to_string())
    }

    #[test]
    fn whitespace_input_does_not_transition() {
        let mut session = LookupSession::new();

        assert_eq!(session.begin("   "), Err(LookupError::EmptyInput));
        assert_eq!(session.state(), &LookupState::Idle);
        assert!(session.result().is_none());
    }

    #[test]
    fn success_returns_to_idle_with_result() {
        let mut session = LookupSession::new();
        let ticket = session.begin("  apple ").unwrap();
        assert_eq!(ticket.word, "apple");
        assert!(session.is_loading());

        let completion = session.complete(&ticket, definition("**apple** (noun)"));

        assert_eq!(
            completion,
            Completion::Succeeded {
                word: "apple".to_string()
            }
        );
        assert!(!session.is_loading());
        let result = session.result().unwrap();
        assert_eq!(result.text, "**apple** (noun)");
        assert!(!result.is_error());
    }

    #[test]
    fn failure_shows_fixed_message() {
        let mut session = LookupSession::new();
        let ticket = session.begin("xyzzy").unwrap();

        let completion = session.complete(&ticket, LookupOutcome::Failed("quota".to_string()));

        assert_eq!(
            completion,
            Completion::Failed {
                word: "xyzzy".to_string()
            }
        );
        assert_eq!(session.state(), &LookupState::Idle);
        let result = session.result().unwrap();
        assert!(result.is_error());
        assert_eq!(result.text, LOOKUP_ERROR_MESSAGE);
    }

    #[test]
    fn busy_session_rejects_new_lookup() {
        let mut session = LookupSession::new();
        let first = session.begin("apple").unwrap();

        assert_eq!(
            session.begin("banana"),
            Err(LookupError::Busy {
                word: "apple".to_string()
            })
        );
        assert_eq!(session.state(), &LookupState::Loading(first));
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut session = LookupSession::new();
        let first = session.begin("apple").unwrap();
        session.complete(&first, definition("apple text"));
        let second = session.begin("banana").unwrap();

        assert_eq!(session.complete(&first, definition("late")), Completion::Stale);
        assert_eq!(session.state(), &LookupState::Loading(second.clone()));

        session.complete(&second, definition("banana text"));
        assert_eq!(session.complete(&second, definition("again")), Completion::Stale);
        assert_eq!(session.result().unwrap().text, "banana text");
    }

    #[test]
    fn tickets_increase() {
        let mut session = LookupSession::new();
        let first = session.begin("apple").unwrap();
        session.complete(&first, definition("a"));
        let second = session.begin("apple").unwrap();

        assert!(second.id > first.id);
        assert_ne!(first, second);
    }

    #[test]
    fn new_lookup_clears_previous_result() {
        let mut session = LookupSession::new();
        let first = session.begin("apple").unwrap();
        session.complete(&first, definition("a"));

        session.begin("banana").unwrap();
        assert!(session.result().is_none());
    }
}
