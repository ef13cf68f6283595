use serde::{Deserialize, Serialize};

use super::defaults;

/// HTTP search engine adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchEngineConfig {
    pub endpoint: String,
    pub index: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_ms: u64,
}

impl Default for SearchEngineConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_ENGINE_ENDPOINT.to_string(),
            index: defaults::DEFAULT_ENGINE_INDEX.to_string(),
            username: None,
            password: None,
            timeout_ms: defaults::DEFAULT_ENGINE_TIMEOUT_MS,
        }
    }
}
