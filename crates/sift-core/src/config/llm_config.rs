use serde::{Deserialize, Serialize};

use super::defaults;

/// Intent / entity / rewrite (chat-completion) service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub enabled: bool,
    pub api_url: String,
    /// Bearer token. Falls back to `SIFT_LLM_API_KEY`.
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_ms: u64,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Allow the rewrite stage to replace the current query.
    pub rewrite_enabled: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_LLM_ENABLED,
            api_url: defaults::DEFAULT_LLM_API_URL.to_string(),
            api_key: None,
            model: defaults::DEFAULT_LLM_MODEL.to_string(),
            timeout_ms: defaults::DEFAULT_LLM_TIMEOUT_MS,
            temperature: defaults::DEFAULT_LLM_TEMPERATURE,
            max_tokens: defaults::DEFAULT_LLM_MAX_TOKENS,
            rewrite_enabled: true,
        }
    }
}
