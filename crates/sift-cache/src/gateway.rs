use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sift_core::config::CacheConfig;
use sift_core::context::{Entity, Intent, QueryContext, SynonymCandidate};
use sift_core::traits::{ICacheStore, IntentRecognition};
use tracing::{debug, warn};

use crate::keys;
use crate::memory_store::MemoryCacheStore;

/// Typed, purpose-scoped access to the shared cache store.
///
/// Every failure (store error, malformed payload) is logged and reported
/// as a miss; callers never see cache errors.
#[derive(Clone)]
pub struct CacheGateway {
    store: Arc<dyn ICacheStore>,
    config: CacheConfig,
}

impl CacheGateway {
    pub fn new(store: Arc<dyn ICacheStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    /// Gateway over a fresh in-process store sized from `config`.
    pub fn in_memory(config: CacheConfig) -> Self {
        let store = Arc::new(MemoryCacheStore::new(config.max_entries));
        Self::new(store, config)
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // --- full understanding result ---

    pub fn get_context(&self, query: &str) -> Option<QueryContext> {
        self.get_json(&self.key(keys::CONTEXT_SLOT, query))
    }

    pub fn put_context(&self, query: &str, context: &QueryContext) {
        self.put_json(&self.key(keys::CONTEXT_SLOT, query), context, self.config.context_ttl());
    }

    // --- language-service answers ---

    pub fn get_intent(&self, query: &str) -> Option<IntentRecognition> {
        self.get_json(&self.key(keys::INTENT_SLOT, query))
    }

    pub fn put_intent(&self, query: &str, recognition: &IntentRecognition) {
        self.put_json(&self.key(keys::INTENT_SLOT, query), recognition, self.config.llm_ttl());
    }

    pub fn get_entities(&self, query: &str) -> Option<Vec<Entity>> {
        self.get_json(&self.key(keys::ENTITY_SLOT, query))
    }

    pub fn put_entities(&self, query: &str, entities: &[Entity]) {
        self.put_json(&self.key(keys::ENTITY_SLOT, query), &entities, self.config.llm_ttl());
    }

    pub fn get_rewrite(&self, query: &str, intent: Intent) -> Option<String> {
        self.get_json(&self.rewrite_key(query, intent))
    }

    pub fn put_rewrite(&self, query: &str, intent: Intent, rewritten: &str) {
        self.put_json(&self.rewrite_key(query, intent), &rewritten, self.config.llm_ttl());
    }

    // --- lexicon ---

    pub fn get_synonyms(&self, term: &str) -> Option<Vec<SynonymCandidate>> {
        self.get_json(&self.key(keys::SYNONYM_SLOT, term))
    }

    pub fn put_synonyms(&self, term: &str, synonyms: &[SynonymCandidate]) {
        self.put_json(&self.key(keys::SYNONYM_SLOT, term), &synonyms, self.config.synonym_ttl());
    }

    // --- embeddings ---

    pub fn get_embedding(&self, text: &str) -> Option<Vec<f32>> {
        self.get_json(&self.key(keys::EMBEDDING_SLOT, text))
    }

    pub fn put_embedding(&self, text: &str, embedding: &[f32]) {
        self.put_json(&self.key(keys::EMBEDDING_SLOT, text), &embedding, self.config.embedding_ttl());
    }

    /// Drop every entry this gateway owns.
    pub fn clear(&self) -> usize {
        match self.store.delete_by_prefix(&self.config.key_prefix) {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "cache clear failed");
                0
            }
        }
    }

    /// Drop one purpose slot, e.g. after a lexicon reload.
    pub fn clear_synonyms(&self) -> usize {
        let prefix = format!("{}{}", self.config.key_prefix, keys::SYNONYM_SLOT);
        self.store.delete_by_prefix(&prefix).unwrap_or_else(|e| {
            warn!(error = %e, "synonym cache clear failed");
            0
        })
    }

    fn key(&self, slot: &str, text: &str) -> String {
        keys::key(&self.config.key_prefix, slot, text)
    }

    fn rewrite_key(&self, query: &str, intent: Intent) -> String {
        keys::key(
            &self.config.key_prefix,
            keys::REWRITE_SLOT,
            &format!("{intent}\u{1f}{query}"),
        )
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "cache read failed, treating as miss");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key, "cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(key, error = %e, "cached payload unreadable, evicting");
                let _ = self.store.delete(key);
                None
            }
        }
    }

    fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: Duration) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "cache payload not serializable");
                return;
            }
        };
        if let Err(e) = self.store.set(key, raw, ttl) {
            warn!(key, error = %e, "cache write failed");
        }
    }
}
