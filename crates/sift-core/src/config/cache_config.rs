use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Cache gateway settings. Each purpose has an independent TTL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub key_prefix: String,
    pub context_ttl_secs: u64,
    pub llm_ttl_secs: u64,
    pub synonym_ttl_secs: u64,
    pub embedding_ttl_secs: u64,
    /// Max entries for the in-process store.
    pub max_entries: u64,
}

impl CacheConfig {
    pub fn context_ttl(&self) -> Duration {
        Duration::from_secs(self.context_ttl_secs)
    }

    pub fn llm_ttl(&self) -> Duration {
        Duration::from_secs(self.llm_ttl_secs)
    }

    pub fn synonym_ttl(&self) -> Duration {
        Duration::from_secs(self.synonym_ttl_secs)
    }

    pub fn embedding_ttl(&self) -> Duration {
        Duration::from_secs(self.embedding_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key_prefix: defaults::DEFAULT_CACHE_KEY_PREFIX.to_string(),
            context_ttl_secs: defaults::DEFAULT_CONTEXT_TTL_SECS,
            llm_ttl_secs: defaults::DEFAULT_LLM_TTL_SECS,
            synonym_ttl_secs: defaults::DEFAULT_SYNONYM_TTL_SECS,
            embedding_ttl_secs: defaults::DEFAULT_EMBEDDING_TTL_SECS,
            max_entries: defaults::DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}
