//! # sift-embeddings
//!
//! Embedding and similarity service for query expansion and vector retrieval.
//! A configured provider (HTTP API or local hashing) sits behind a cached
//! [`EmbeddingEngine`] implementing `IEmbeddingService`. Provider failures
//! never escape: they read as "unavailable" and empty embeddings.

pub mod engine;
pub mod providers;

pub use engine::EmbeddingEngine;
pub use providers::{create_provider, ApiProvider, HashingProvider};
