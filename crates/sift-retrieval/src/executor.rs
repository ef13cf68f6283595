//! HybridQueryExecutor: turns a decision into one engine request.
//!
//! Lexical clauses carry boost `1 - w` and the kNN clause boost `w`. A
//! vector that cannot be generated degrades the search to keyword only.

use std::sync::Arc;
use std::time::Instant;

use sift_core::config::RetrievalConfig;
use sift_core::constants::REASON_VECTOR_FAILED;
use sift_core::context::QueryContext;
use sift_core::errors::SiftError;
use sift_core::models::{
    BoolQuery, EngineRequest, KnnClause, RetrievalDecision, RetrievalRequest, SearchHit, SearchMetadata,
    StructuredQuery,
};
use sift_core::traits::{IEmbeddingService, ISearchEngine};
use sift_observability::tracing_setup::events;
use sift_observability::{search_span, RetrievalMetrics};
use tracing::{debug, info};

use crate::lexical;

/// Ranked hits plus how they were obtained.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub hits: Vec<SearchHit>,
    pub total: u64,
    pub metadata: SearchMetadata,
    pub decision: RetrievalDecision,
}

/// Engine failure, with the metadata gathered up to that point.
#[derive(Debug, thiserror::Error)]
#[error("hybrid search failed: {error}")]
pub struct SearchFailure {
    #[source]
    pub error: SiftError,
    pub metadata: SearchMetadata,
}

pub struct HybridQueryExecutor {
    embeddings: Arc<dyn IEmbeddingService>,
    engine: Arc<dyn ISearchEngine>,
    config: RetrievalConfig,
    metrics: Arc<RetrievalMetrics>,
}

impl HybridQueryExecutor {
    pub fn new(
        embeddings: Arc<dyn IEmbeddingService>,
        engine: Arc<dyn ISearchEngine>,
        config: RetrievalConfig,
        metrics: Arc<RetrievalMetrics>,
    ) -> Self {
        Self {
            embeddings,
            engine,
            config,
            metrics,
        }
    }

    pub fn metrics(&self) -> &Arc<RetrievalMetrics> {
        &self.metrics
    }

    /// Build the engine request for `decision`, updating its timings and
    /// degrading it when no query vector can be produced.
    pub fn build_request(
        &self,
        decision: &mut RetrievalDecision,
        request: &RetrievalRequest,
        enrichment: Option<&QueryContext>,
    ) -> EngineRequest {
        let knn = if decision.semantic_enabled {
            self.knn_clause(decision, request)
        } else {
            None
        };

        let started = Instant::now();
        let query = decision.keyword_enabled.then(|| {
            let lexical = self.lexical_clause(request, enrichment);
            if knn.is_some() {
                lexical.with_boost((1.0 - decision.semantic_weight) as f32)
            } else {
                lexical
            }
        });
        decision.timings.query_build = started.elapsed();

        EngineRequest {
            query,
            knn,
            from: request.from(),
            size: request.size,
        }
    }

    fn knn_clause(&self, decision: &mut RetrievalDecision, request: &RetrievalRequest) -> Option<KnnClause> {
        let started = Instant::now();
        let vector = self.embeddings.generate_embedding(request.free_text.trim());
        decision.timings.vector_generation = started.elapsed();

        if vector.is_empty() {
            self.metrics.record_vector_failure();
            events::degradation_triggered("embeddings", REASON_VECTOR_FAILED, "keyword");
            decision.degrade_to_keyword(REASON_VECTOR_FAILED);
            decision.semantic_weight = 0.0;
            return None;
        }

        let k = self.config.knn_k.max(request.size);
        Some(KnnClause {
            field: self.config.vector_field.clone(),
            query_vector: vector,
            k,
            num_candidates: self.config.knn_num_candidates.max(k),
            boost: decision.semantic_weight as f32,
        })
    }

    fn lexical_clause(&self, request: &RetrievalRequest, enrichment: Option<&QueryContext>) -> StructuredQuery {
        let lexical = lexical::build_lexical_query(&request.free_text, request.pinyin, &self.config);
        match enrichment.and_then(|ctx| ctx.final_query()) {
            Some(understood) if !understood.is_match_all() && !lexical.is_match_all() => {
                StructuredQuery::Bool(BoolQuery {
                    should: vec![lexical, understood.clone()],
                    minimum_should_match: Some(1),
                    ..BoolQuery::default()
                })
            }
            _ => lexical,
        }
    }

    /// Execute `decision` for `request`.
    pub fn execute_hybrid_search(
        &self,
        decision: RetrievalDecision,
        request: &RetrievalRequest,
    ) -> Result<SearchOutcome, SearchFailure> {
        self.execute_with_enrichment(decision, request, None)
    }

    /// Execute `decision`, merging the understanding pipeline's final query
    /// into the lexical part when one is given.
    pub fn execute_with_enrichment(
        &self,
        mut decision: RetrievalDecision,
        request: &RetrievalRequest,
        enrichment: Option<&QueryContext>,
    ) -> Result<SearchOutcome, SearchFailure> {
        let span = search_span!(request.free_text, decision.requested_mode);
        let _guard = span.enter();
        let started = Instant::now();

        let engine_request = self.build_request(&mut decision, request, enrichment);
        debug!(
            lexical = engine_request.query.is_some(),
            knn = engine_request.knn.is_some(),
            "engine request built"
        );
        let result = self.engine.search(&engine_request);

        decision.timings.total = started.elapsed();
        let metadata = SearchMetadata::from_decision(&decision);

        match result {
            Ok(response) => {
                self.metrics
                    .record_strategy(decision.actual_strategy, decision.diverges_from_request());
                info!(
                    strategy = decision.actual_strategy.as_str(),
                    hits = response.hits.len(),
                    total = response.total,
                    engine = self.engine.name(),
                    "hybrid search complete"
                );
                Ok(SearchOutcome {
                    hits: response.hits,
                    total: response.total,
                    metadata,
                    decision,
                })
            }
            Err(error) => {
                self.metrics.record_engine_failure();
                events::degradation_triggered(self.engine.name(), &error.to_string(), "none");
                Err(SearchFailure { error, metadata })
            }
        }
    }
}
