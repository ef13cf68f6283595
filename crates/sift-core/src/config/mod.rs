pub mod cache_config;
pub mod defaults;
pub mod embedding_config;
pub mod expansion_config;
pub mod llm_config;
pub mod observability_config;
pub mod pipeline_config;
pub mod retrieval_config;
pub mod search_engine_config;
pub mod stage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use cache_config::CacheConfig;
pub use embedding_config::EmbeddingConfig;
pub use expansion_config::{ExpansionConfig, WordSense};
pub use llm_config::LlmConfig;
pub use observability_config::ObservabilityConfig;
pub use pipeline_config::PipelineConfig;
pub use retrieval_config::{PhoneticBoosts, RetrievalConfig};
pub use search_engine_config::SearchEngineConfig;
pub use stage_config::{StageOverride, StageSettings, StagesConfig};

use crate::errors::ConfigError;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    pub pipeline: PipelineConfig,
    pub stages: StagesConfig,
    pub expansion: ExpansionConfig,
    pub cache: CacheConfig,
    pub embedding: EmbeddingConfig,
    pub llm: LlmConfig,
    pub retrieval: RetrievalConfig,
    pub search_engine: SearchEngineConfig,
    pub observability: ObservabilityConfig,
}

impl SiftConfig {
    /// Parse from a TOML string. Missing sections and fields take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseFailed {
            reason: e.to_string(),
        })
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no subsystem can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let exp = &self.expansion;
        if !(0.0..=1.0).contains(&exp.semantic_threshold) {
            return Err(ConfigError::invalid(
                "expansion.semantic_threshold",
                "must be within [0, 1]",
            ));
        }
        let weight = self.retrieval.default_semantic_weight;
        if !(0.0..=1.0).contains(&weight) {
            return Err(ConfigError::invalid(
                "retrieval.default_semantic_weight",
                "must be within [0, 1]",
            ));
        }
        if self.retrieval.knn_k == 0 {
            return Err(ConfigError::invalid("retrieval.knn_k", "must be at least 1"));
        }
        if self.retrieval.knn_num_candidates < self.retrieval.knn_k {
            return Err(ConfigError::invalid(
                "retrieval.knn_num_candidates",
                "must be at least knn_k",
            ));
        }
        if self.retrieval.searchable_fields.is_empty() {
            return Err(ConfigError::invalid(
                "retrieval.searchable_fields",
                "at least one field is required",
            ));
        }
        if self.embedding.dimensions == 0 {
            return Err(ConfigError::invalid("embedding.dimensions", "must be non-zero"));
        }
        if self.cache.key_prefix.is_empty() {
            return Err(ConfigError::invalid("cache.key_prefix", "must not be empty"));
        }
        for name in self.stages.names() {
            if name.trim().is_empty() {
                return Err(ConfigError::invalid("stages", "stage name must not be empty"));
            }
        }
        Ok(())
    }
}
