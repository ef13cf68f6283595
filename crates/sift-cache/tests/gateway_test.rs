use std::sync::Arc;
use std::time::Duration;

use sift_cache::{CacheGateway, MemoryCacheStore};
use sift_core::config::CacheConfig;
use sift_core::context::{Entity, EntityType, Intent, QueryContext, SynonymCandidate, SynonymSource};
use sift_core::errors::{CacheError, SiftResult};
use sift_core::traits::{ICacheStore, IntentRecognition};

/// Store that fails every call.
struct BrokenStore;

impl ICacheStore for BrokenStore {
    fn get(&self, _key: &str) -> SiftResult<Option<String>> {
        Err(CacheError::Unavailable { reason: "down".into() }.into())
    }
    fn set(&self, _key: &str, _value: String, _ttl: Duration) -> SiftResult<()> {
        Err(CacheError::Unavailable { reason: "down".into() }.into())
    }
    fn delete(&self, _key: &str) -> SiftResult<()> {
        Err(CacheError::Unavailable { reason: "down".into() }.into())
    }
    fn delete_by_prefix(&self, _prefix: &str) -> SiftResult<usize> {
        Err(CacheError::Unavailable { reason: "down".into() }.into())
    }
}

fn gateway() -> CacheGateway {
    CacheGateway::in_memory(CacheConfig::default())
}

#[test]
fn context_roundtrips_through_cache() {
    let gw = gateway();
    let mut ctx = QueryContext::new("缴费查询");
    ctx.add_synonym("交费");
    gw.put_context("缴费查询", &ctx);

    let cached = gw.get_context("缴费查询").unwrap();
    assert_eq!(cached.synonyms(), ["交费"]);
    assert!(gw.get_context("别的").is_none());
}

#[test]
fn llm_slots_are_independent() {
    let gw = gateway();
    gw.put_intent(
        "q",
        &IntentRecognition {
            intent: Intent::Question,
            confidence: 0.9,
        },
    );
    gw.put_entities("q", &[Entity::new("张三", EntityType::Person)]);
    gw.put_rewrite("q", Intent::Question, "better q");

    assert_eq!(gw.get_intent("q").unwrap().intent, Intent::Question);
    assert_eq!(gw.get_entities("q").unwrap().len(), 1);
    assert_eq!(gw.get_rewrite("q", Intent::Question).as_deref(), Some("better q"));
    assert!(gw.get_rewrite("q", Intent::Command).is_none());
}

fn exact(term: &str) -> SynonymCandidate {
    SynonymCandidate {
        term: term.into(),
        source: SynonymSource::Exact,
    }
}

#[test]
fn synonyms_and_embeddings_roundtrip() {
    let gw = gateway();
    gw.put_synonyms("缴费", &[exact("交费"), exact("支付")]);
    gw.put_embedding("缴费", &[0.1, 0.2]);
    assert_eq!(gw.get_synonyms("缴费").unwrap(), vec![exact("交费"), exact("支付")]);
    assert_eq!(gw.get_embedding("缴费").unwrap(), vec![0.1, 0.2]);
}

#[test]
fn clear_synonyms_keeps_other_slots() {
    let gw = gateway();
    gw.put_synonyms("a", &[exact("b")]);
    gw.put_embedding("a", &[1.0]);
    assert_eq!(gw.clear_synonyms(), 1);
    assert!(gw.get_synonyms("a").is_none());
    assert!(gw.get_embedding("a").is_some());
}

#[test]
fn store_failures_read_as_misses() {
    let gw = CacheGateway::new(Arc::new(BrokenStore), CacheConfig::default());
    gw.put_synonyms("a", &[exact("b")]);
    assert!(gw.get_synonyms("a").is_none());
    assert_eq!(gw.clear(), 0);
}

#[test]
fn corrupt_payload_is_evicted() {
    let store = Arc::new(MemoryCacheStore::new(100));
    let config = CacheConfig::default();
    let gw = CacheGateway::new(store.clone(), config.clone());
    let key = sift_cache::keys::key(&config.key_prefix, sift_cache::keys::SYNONYM_SLOT, "a");
    store.set(&key, "{not json".into(), Duration::from_secs(60)).unwrap();

    assert!(gw.get_synonyms("a").is_none());
    assert_eq!(store.get(&key).unwrap(), None);
}
