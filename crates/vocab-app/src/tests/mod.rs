use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use kanal::AsyncReceiver;
use tokio::sync::Notify;
use tokio::time::timeout;
use vocab_config::Config;
use vocab_core::PersistentStore;
use vocab_definer::{DefineError, Definer, Definition, ProviderMetadata};
use vocab_types::AppEvent;

use crate::state::AppState;


/// Definer that answers from memory, optionally waiting for a signal first
pub struct FakeDefiner {
    fail: bool,
    panic: bool,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl FakeDefiner {
    pub fn ok() -> Self {
        Self {
            fail: false,
            panic: false,
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::ok()
        }
    }

    pub fn panicking() -> Self {
        Self {
            panic: true,
            ..Self::ok()
        }
    }

    /// Every lookup blocks until `gate` is notified
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::ok()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Definer for FakeDefiner {
    async fn define(&self, word: &str) -> Result<Definition, DefineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if self.panic {
            panic!("definer blew up on '{word}'");
        }

        if self.fail {
            return Err(DefineError::ApiError("boom".to_string()));
        }

        Ok(Definition {
            word: word.to_string(),
            text: format!("## {word}\n* a test definition"),
            provider: "fake".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
            model: "fake".to_string(),
            requires_api_key: false,
        }
    }
}

pub fn app_state(store: PersistentStore, definer: Arc<FakeDefiner>) -> Arc<AppState> {
    Arc::new(AppState::new(Config::default(), store, definer, false))
}

/// Next event or panic after two seconds
pub async fn next_event(rx: &AsyncReceiver<AppEvent>) -> AppEvent {
    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Ok(event)) => event,
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - no event arrived"),
    }
}

/// Asserts nothing arrives for a short while
pub async fn assert_quiet(rx: &AsyncReceiver<AppEvent>) {
    if let Ok(Ok(event)) = timeout(Duration::from_millis(100), rx.recv()).await {
        panic!("Unexpected event: {:?}", event);
    }
}
