//! Durable storage configuration.

use serde::{Deserialize, Serialize};

/// Durable key-value storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend type: `"local"` (JSON files on disk) or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Root directory for the local backend.
    #[serde(default = "default_root")]
    pub root: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            root: default_root(),
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_root() -> String {
    "data/storage".to_string()
}
