//! EmbeddingEngine: the embedding and similarity service.
//!
//! Wraps the configured provider with the cache gateway and dimension
//! checks. Implements `IEmbeddingService`: every failure is logged and
//! returned as an empty embedding.

use sift_cache::CacheGateway;
use sift_core::config::EmbeddingConfig;
use sift_core::errors::{EmbeddingError, SiftResult};
use sift_core::traits::{IEmbeddingProvider, IEmbeddingService};
use tracing::{debug, info, warn};

use crate::providers;

pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: Option<CacheGateway>,
    config: EmbeddingConfig,
}

impl EmbeddingEngine {
    /// Create an engine with the provider named in `config`.
    pub fn new(config: EmbeddingConfig, cache: Option<CacheGateway>) -> Self {
        let provider = providers::create_provider(&config);
        Self::with_provider(provider, config, cache)
    }

    /// Create an engine around an existing provider.
    pub fn with_provider(
        provider: Box<dyn IEmbeddingProvider>,
        config: EmbeddingConfig,
        cache: Option<CacheGateway>,
    ) -> Self {
        info!(
            provider = provider.name(),
            dims = config.dimensions,
            enabled = config.enabled,
            cached = cache.is_some(),
            "EmbeddingEngine initialized"
        );
        Self {
            provider,
            cache,
            config,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    /// Embed `text`, surfacing the failure instead of degrading.
    pub fn try_embed(&self, text: &str) -> SiftResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput.into());
        }
        if !self.is_service_available() {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.provider.name().to_string(),
            }
            .into());
        }

        if let Some(cache) = &self.cache {
            if let Some(vec) = cache.get_embedding(text) {
                if vec.len() == self.config.dimensions {
                    debug!(provider = self.provider.name(), "cache hit for embedding");
                    return Ok(vec);
                }
            }
        }

        let embedding = self.provider.embed(text)?;
        validate_dimensions(&embedding, self.config.dimensions)?;

        if let Some(cache) = &self.cache {
            cache.put_embedding(text, &embedding);
        }
        Ok(embedding)
    }

    /// Embed many texts, reusing cached vectors and batching the misses.
    /// Texts that cannot be embedded map to empty vectors.
    pub fn generate_embeddings(&self, texts: &[String]) -> Vec<Vec<f32>> {
        if !self.is_service_available() {
            return vec![Vec::new(); texts.len()];
        }

        let mut out: Vec<Vec<f32>> = vec![Vec::new(); texts.len()];
        let mut missing: Vec<usize> = Vec::new();
        for (i, text) in texts.iter().enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            match self.cache.as_ref().and_then(|c| c.get_embedding(text)) {
                Some(vec) if vec.len() == self.config.dimensions => out[i] = vec,
                _ => missing.push(i),
            }
        }
        if missing.is_empty() {
            return out;
        }

        let batch: Vec<String> = missing.iter().map(|&i| texts[i].clone()).collect();
        match self.provider.embed_batch(&batch) {
            Ok(vecs) if vecs.len() == batch.len() => {
                for (&i, vec) in missing.iter().zip(vecs) {
                    if vec.len() != self.config.dimensions {
                        warn!(expected = self.config.dimensions, actual = vec.len(), "dropping embedding with wrong dimensions");
                        continue;
                    }
                    if let Some(cache) = &self.cache {
                        cache.put_embedding(&texts[i], &vec);
                    }
                    out[i] = vec;
                }
            }
            Ok(vecs) => {
                warn!(expected = batch.len(), actual = vecs.len(), "batch embedding returned wrong count");
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "batch embedding failed");
            }
        }
        out
    }
}

impl IEmbeddingService for EmbeddingEngine {
    fn generate_embedding(&self, text: &str) -> Vec<f32> {
        match self.try_embed(text) {
            Ok(vec) => vec,
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "embedding generation failed");
                Vec::new()
            }
        }
    }

    fn is_service_available(&self) -> bool {
        self.config.enabled && self.provider.is_available()
    }
}

/// Reject vectors whose length differs from the configured dimensionality.
pub fn validate_dimensions(embedding: &[f32], expected: usize) -> SiftResult<()> {
    if embedding.len() != expected {
        return Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        }
        .into());
    }
    Ok(())
}
