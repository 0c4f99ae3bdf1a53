use std::env;

use serde::{Deserialize, Serialize};

use self::definer::DefinerConfig;
use self::storage::StorageConfig;
use self::ui::UiConfig;

pub mod definer;
pub mod storage;
pub mod ui;

fn default_event_queue() -> usize {
    64
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub definer: DefinerConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,

    /// Capacity of the ui -> app channel
    #[serde(default = "default_event_queue")]
    pub event_queue: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            definer: DefinerConfig::default(),
            storage: StorageConfig::default(),
            ui: UiConfig::default(),
            event_queue: default_event_queue(),
        }
    }
}

impl Config {
    /// Environment always wins over values loaded from a profile file
    pub fn apply_env(&mut self) {
        self.definer.apply_env();
        self.storage.apply_env();

        if let Some(queue) = env::var("VOCAB_EVENT_QUEUE")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.event_queue = queue;
        }

        if self.event_queue == 0 {
            self.event_queue = default_event_queue();
        }
    }
}
