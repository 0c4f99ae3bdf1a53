use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use vocab_config::Config;
use vocab_config::definer::DefinerConfig;
use vocab_core::{DictionaryState, PersistentStore};
use vocab_definer::{Definer, GeminiDefiner};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub dictionary: RwLock<DictionaryState>,
    pub definer: Arc<dyn Definer>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: PersistentStore,
        definer: Arc<dyn Definer>,
        system_dark: bool,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            dictionary: RwLock::new(DictionaryState::open(store, system_dark)),
            definer,
        }
    }
}

pub fn build_definer(config: &DefinerConfig) -> anyhow::Result<Arc<dyn Definer>> {
    match config.provider.as_str() {
        "gemini" => {
            let definer = GeminiDefiner::new(
                config.api_key.clone(),
                config.api_url.clone(),
                config.model.clone(),
                Duration::from_secs(config.timeout_seconds),
            )?;
            let metadata = definer.metadata();
            tracing::info!("Using {} model {}", metadata.name, metadata.model);
            Ok(Arc::new(definer))
        }
        other => anyhow::bail!("Unknown definition provider: {other}"),
    }
}
