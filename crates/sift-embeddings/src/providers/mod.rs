//! Provider registry.
//!
//! - `api`: OpenAI-compatible embeddings endpoint (default)
//! - `hashing`: local feature hashing, always available, offline

pub mod api_provider;
pub mod hashing_provider;

pub use api_provider::ApiProvider;
pub use hashing_provider::HashingProvider;

use sift_core::config::EmbeddingConfig;
use sift_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

/// Environment variable consulted when `embedding.api_key` is unset.
pub const API_KEY_ENV: &str = "SIFT_EMBEDDING_API_KEY";

/// Create the configured provider.
///
/// An `api` provider without a key is still returned; it reports itself
/// unavailable so retrieval degrades to keyword search.
pub fn create_provider(config: &EmbeddingConfig) -> Box<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "api" => {
            let api_key = config
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()));
            if api_key.is_none() {
                warn!(provider = "api", "no embedding API key configured; vector service unavailable");
            }
            info!(provider = "api", model = %config.model, dims = config.dimensions, "embedding provider configured");
            Box::new(ApiProvider::new(config, api_key))
        }
        "hashing" => {
            info!(provider = "hashing", dims = config.dimensions, "using hashing embedding provider");
            Box::new(HashingProvider::new(config.dimensions))
        }
        other => {
            warn!(provider = other, "unknown embedding provider, using hashing provider");
            Box::new(HashingProvider::new(config.dimensions))
        }
    }
}
