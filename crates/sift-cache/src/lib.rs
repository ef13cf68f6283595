//! # sift-cache
//!
//! Cache gateway for the understanding pipeline and the embedding engine.
//! Each purpose (full context, LLM answers, synonyms, embeddings) gets its
//! own key slot and TTL. Store failures are logged and treated as misses.

pub mod gateway;
pub mod keys;
pub mod memory_store;

pub use gateway::CacheGateway;
pub use memory_store::MemoryCacheStore;
