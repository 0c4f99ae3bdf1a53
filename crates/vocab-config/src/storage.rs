use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the per-profile data directory
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn apply_env(&mut self) {
        if let Ok(dir) = env::var("VOCAB_DATA_DIR")
            && !dir.is_empty()
        {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }
}
