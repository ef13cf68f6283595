use std::cmp::Ordering;
use std::sync::Arc;

use sift_core::config::defaults::{SEMANTIC_PRIORITY, SEMANTIC_TIMEOUT_MS};
use sift_core::config::StageSettings;
use sift_core::constants::{META_SEMANTIC_SIMILARITY_PREFIX, STAGE_SEMANTIC};
use sift_core::context::{QueryContext, SemanticCandidate};
use sift_core::errors::SiftResult;
use sift_core::traits::IEmbeddingService;
use tracing::debug;

use crate::lexicon::Vocabulary;
use crate::stage::QueryStage;

/// Adds vocabulary terms whose embedding is close to the query's.
pub struct SemanticExpansionStage {
    settings: StageSettings,
    embeddings: Arc<dyn IEmbeddingService>,
    vocabulary: Arc<Vocabulary>,
    threshold: f64,
    max_terms: usize,
}

impl SemanticExpansionStage {
    pub const DEFAULT_SETTINGS: StageSettings = StageSettings::new(SEMANTIC_PRIORITY, SEMANTIC_TIMEOUT_MS);

    pub fn new(
        settings: StageSettings,
        embeddings: Arc<dyn IEmbeddingService>,
        vocabulary: Arc<Vocabulary>,
        threshold: f64,
        max_terms: usize,
    ) -> Self {
        Self {
            settings,
            embeddings,
            vocabulary,
            threshold,
            max_terms,
        }
    }

    /// Rank candidate terms for `query`.
    ///
    /// Candidates are `extra` followed by the vocabulary, deduplicated.
    /// Terms already inside the query are dropped, as are terms below the
    /// threshold. Sorted by similarity descending, ties by term.
    pub fn related_terms(&self, query: &str, extra: &[String]) -> Vec<SemanticCandidate> {
        let query_vec = self.embeddings.generate_embedding(query);
        if query_vec.is_empty() {
            return Vec::new();
        }

        let mut seen: Vec<&str> = Vec::new();
        let mut scored: Vec<(String, f64)> = Vec::new();
        for term in extra.iter().chain(self.vocabulary.terms()) {
            if seen.contains(&term.as_str()) || query.contains(term.as_str()) {
                continue;
            }
            seen.push(term);
            let term_vec = self.embeddings.generate_embedding(term);
            if term_vec.is_empty() {
                continue;
            }
            let sim = self.embeddings.cosine_similarity(&query_vec, &term_vec);
            if sim >= self.threshold {
                scored.push((term.clone(), sim));
            }
        }

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then_with(|| a.0.cmp(&b.0)));
        scored
            .into_iter()
            .take(self.max_terms)
            .enumerate()
            .map(|(i, (term, similarity))| SemanticCandidate {
                term,
                similarity,
                rank: i + 1,
            })
            .collect()
    }
}

impl QueryStage for SemanticExpansionStage {
    fn name(&self) -> &str {
        STAGE_SEMANTIC
    }

    fn settings(&self) -> StageSettings {
        self.settings
    }

    fn skip_for_simple_query(&self) -> bool {
        true
    }

    fn process(&self, ctx: &mut QueryContext) -> SiftResult<()> {
        if !self.embeddings.is_service_available() {
            debug!("embedding service unavailable, semantic expansion skipped");
            return Ok(());
        }
        let extra = ctx.synonyms().to_vec();
        let related = self.related_terms(ctx.current_query(), &extra);
        for candidate in related {
            if ctx.add_related_term(candidate.term.clone()) {
                ctx.put_metadata(
                    format!("{META_SEMANTIC_SIMILARITY_PREFIX}{}", candidate.term),
                    format!("{:.4}", candidate.similarity),
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    /// Looks up fixed vectors; unknown text embeds to nothing.
    struct TableEmbeddings {
        table: BTreeMap<&'static str, Vec<f32>>,
        available: bool,
    }

    impl IEmbeddingService for TableEmbeddings {
        fn generate_embedding(&self, text: &str) -> Vec<f32> {
            self.table.get(text).cloned().unwrap_or_default()
        }

        fn is_service_available(&self) -> bool {
            self.available
        }
    }

    fn stage(available: bool) -> SemanticExpansionStage {
        let table = BTreeMap::from([
            ("缴费", vec![1.0, 0.0]),
            ("交费", vec![0.9, 0.1]),
            ("支付", vec![0.8, 0.3]),
            ("天气", vec![0.0, 1.0]),
        ]);
        let embeddings = Arc::new(TableEmbeddings { table, available });
        let vocab = Arc::new(Vocabulary::new(["交费", "支付", "天气", "缴费"]));
        SemanticExpansionStage::new(SemanticExpansionStage::DEFAULT_SETTINGS, embeddings, vocab, 0.7, 5)
    }

    #[test]
    fn keeps_close_terms_in_similarity_order() {
        let mut ctx = QueryContext::new("缴费");
        stage(true).process(&mut ctx).unwrap();
        assert_eq!(ctx.related_terms(), ["交费", "支付"]);
        assert!(ctx.metadata_value("semantic_similarity_交费").is_some());
        assert!(ctx.metadata_value("semantic_similarity_天气").is_none());
    }

    #[test]
    fn caps_at_max_terms_keeping_the_closest() {
        // t1 is closest to the query, t8 furthest; all clear the threshold.
        let names = ["t1", "t2", "t3", "t4", "t5", "t6", "t7", "t8"];
        let mut table: BTreeMap<&'static str, Vec<f32>> = BTreeMap::new();
        table.insert("q", vec![1.0, 0.0]);
        for (i, name) in names.iter().enumerate() {
            table.insert(*name, vec![1.0, 0.05 * (i + 1) as f32]);
        }
        let embeddings = Arc::new(TableEmbeddings { table, available: true });
        let vocab = Arc::new(Vocabulary::new(["t7", "t3", "t8", "t1", "t5", "t2", "t6", "t4"]));
        let stage = SemanticExpansionStage::new(SemanticExpansionStage::DEFAULT_SETTINGS, embeddings, vocab, 0.7, 5);

        let ranked = stage.related_terms("q", &[]);
        let terms: Vec<&str> = ranked.iter().map(|c| c.term.as_str()).collect();
        assert_eq!(terms, ["t1", "t2", "t3", "t4", "t5"]);
        assert!(ranked.windows(2).all(|w| w[0].similarity > w[1].similarity));
        assert_eq!(ranked.iter().map(|c| c.rank).collect::<Vec<_>>(), [1, 2, 3, 4, 5]);

        let mut ctx = QueryContext::new("q");
        stage.process(&mut ctx).unwrap();
        assert_eq!(ctx.related_terms(), ["t1", "t2", "t3", "t4", "t5"]);
        assert!(ctx.metadata_value("semantic_similarity_t6").is_none());
    }

    #[test]
    fn unavailable_service_is_a_no_op() {
        let mut ctx = QueryContext::new("缴费");
        stage(false).process(&mut ctx).unwrap();
        assert!(ctx.related_terms().is_empty());
    }

    #[test]
    fn query_without_embedding_yields_nothing() {
        assert!(stage(true).related_terms("未知", &[]).is_empty());
    }

    #[test]
    fn skipped_for_simple_queries() {
        let mut ctx = QueryContext::new("缴");
        ctx.set_skip_complex_processing(true);
        assert!(!stage(true).should_process(&ctx));
    }
}
