use std::sync::Arc;

use sift_cache::CacheGateway;
use sift_core::config::defaults::{SYNONYM_PRIORITY, SYNONYM_TIMEOUT_MS};
use sift_core::config::StageSettings;
use sift_core::constants::{META_SYNONYM_SOURCE_PREFIX, STAGE_SYNONYM};
use sift_core::context::{QueryContext, SynonymCandidate};
use sift_core::errors::SiftResult;
use tracing::debug;

use crate::lexicon::SynonymDictionary;
use crate::stage::QueryStage;

/// Adds dictionary synonyms for each whitespace-separated token.
pub struct SynonymExpansionStage {
    settings: StageSettings,
    dictionary: Arc<SynonymDictionary>,
    max_synonyms: usize,
    cache: Option<CacheGateway>,
}

impl SynonymExpansionStage {
    pub const DEFAULT_SETTINGS: StageSettings = StageSettings::new(SYNONYM_PRIORITY, SYNONYM_TIMEOUT_MS);

    pub fn new(
        settings: StageSettings,
        dictionary: Arc<SynonymDictionary>,
        max_synonyms: usize,
        cache: Option<CacheGateway>,
    ) -> Self {
        Self {
            settings,
            dictionary,
            max_synonyms,
            cache,
        }
    }

    fn synonyms_for(&self, token: &str) -> Vec<SynonymCandidate> {
        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get_synonyms(token)) {
            return cached;
        }
        let found = self.dictionary.lookup(token);
        if let Some(cache) = &self.cache {
            cache.put_synonyms(token, &found);
        }
        found
    }

    /// Ordered, deduplicated, capped synonyms for `query`. The first
    /// occurrence of a term decides its source.
    pub fn expand(&self, query: &str) -> Vec<SynonymCandidate> {
        let mut out: Vec<SynonymCandidate> = Vec::new();
        for token in query.split_whitespace() {
            for syn in self.synonyms_for(token) {
                if syn.term != token && !out.iter().any(|c| c.term == syn.term) {
                    out.push(syn);
                }
            }
        }
        out.truncate(self.max_synonyms);
        out
    }
}

impl QueryStage for SynonymExpansionStage {
    fn name(&self) -> &str {
        STAGE_SYNONYM
    }

    fn settings(&self) -> StageSettings {
        self.settings
    }

    fn process(&self, ctx: &mut QueryContext) -> SiftResult<()> {
        let synonyms = self.expand(ctx.current_query());
        debug!(count = synonyms.len(), "synonym expansion");
        for syn in synonyms {
            if ctx.add_synonym(syn.term.clone()) {
                ctx.put_metadata(format!("{META_SYNONYM_SOURCE_PREFIX}{}", syn.term), syn.source.as_str());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sift_core::config::{CacheConfig, ExpansionConfig};
    use sift_core::context::SynonymSource;

    use super::*;

    fn terms(candidates: &[SynonymCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.term.as_str()).collect()
    }

    fn stage(cache: Option<CacheGateway>) -> SynonymExpansionStage {
        let dict = Arc::new(SynonymDictionary::from_config(&ExpansionConfig::default()));
        SynonymExpansionStage::new(SynonymExpansionStage::DEFAULT_SETTINGS, dict, 5, cache)
    }

    #[test]
    fn compound_token_uses_fuzzy_match() {
        let mut entries = std::collections::BTreeMap::new();
        entries.insert("缴费".to_string(), vec!["交费".into(), "支付".into(), "付费".into()]);
        let s = SynonymExpansionStage::new(
            SynonymExpansionStage::DEFAULT_SETTINGS,
            Arc::new(SynonymDictionary::new(entries)),
            5,
            None,
        );
        let mut ctx = QueryContext::new("缴费查询");
        s.process(&mut ctx).unwrap();
        assert_eq!(ctx.synonyms(), ["交费", "支付", "付费"]);
        assert_eq!(ctx.metadata_value("synonym_source_交费"), Some(&"fuzzy".into()));
    }

    #[test]
    fn exact_token_records_exact_source() {
        let mut ctx = QueryContext::new("缴费");
        stage(None).process(&mut ctx).unwrap();
        assert_eq!(ctx.synonyms(), ["交费", "支付", "付费"]);
        for term in ["交费", "支付", "付费"] {
            let key = format!("synonym_source_{term}");
            assert_eq!(ctx.metadata_value(&key), Some(&"exact".into()));
        }
    }

    #[test]
    fn fuzzy_keys_contribute_in_key_order() {
        // 查询 sorts before 缴费
        let got = stage(None).expand("缴费查询");
        assert_eq!(terms(&got), ["搜索", "检索", "查找", "交费", "支付"]);
        assert!(got.iter().all(|c| c.source == SynonymSource::Fuzzy));
    }

    #[test]
    fn capped_across_tokens() {
        let got = stage(None).expand("生活 缴费 查询 办理");
        assert_eq!(got.len(), 5);
    }

    #[test]
    fn cache_serves_repeat_lookups() {
        let cache = CacheGateway::in_memory(CacheConfig::default());
        let s = stage(Some(cache.clone()));
        s.expand("缴费");
        let cached = cache.get_synonyms("缴费").unwrap_or_default();
        assert_eq!(terms(&cached), ["交费", "支付", "付费"]);
        assert_eq!(s.expand("缴费"), cached);
    }
}
