use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Master switch. When false the service reports unavailable.
    pub enabled: bool,
    /// Embedding provider: "api" or "hashing".
    pub provider: String,
    /// OpenAI-compatible embeddings endpoint.
    pub api_url: String,
    /// Bearer token. Falls back to `SIFT_EMBEDDING_API_KEY`.
    pub api_key: Option<String>,
    pub model: String,
    pub dimensions: usize,
    pub timeout_ms: u64,
    pub max_retries: u32,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            api_url: defaults::DEFAULT_EMBEDDING_API_URL.to_string(),
            api_key: None,
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            timeout_ms: defaults::DEFAULT_EMBEDDING_TIMEOUT_MS,
            max_retries: defaults::DEFAULT_EMBEDDING_MAX_RETRIES,
        }
    }
}
