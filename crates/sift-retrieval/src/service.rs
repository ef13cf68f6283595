use std::sync::Arc;

use sift_core::config::RetrievalConfig;
use sift_core::models::{RetrievalDecision, RetrievalRequest, SearchMetadata, VectorServiceStatus};
use sift_core::traits::{IEmbeddingService, ISearchEngine};
use sift_observability::RetrievalMetrics;
use sift_understanding::QueryUnderstandingService;
use tracing::warn;

use crate::executor::{HybridQueryExecutor, SearchFailure, SearchOutcome};
use crate::strategy::decide_retrieval_strategy;

/// Façade: validate, decide, optionally understand, execute.
pub struct HybridSearchService {
    executor: HybridQueryExecutor,
    embeddings: Arc<dyn IEmbeddingService>,
    understanding: Option<Arc<QueryUnderstandingService>>,
    config: RetrievalConfig,
}

impl HybridSearchService {
    pub fn new(
        embeddings: Arc<dyn IEmbeddingService>,
        engine: Arc<dyn ISearchEngine>,
        config: RetrievalConfig,
        metrics: Arc<RetrievalMetrics>,
    ) -> Self {
        let executor = HybridQueryExecutor::new(Arc::clone(&embeddings), engine, config.clone(), metrics);
        Self {
            executor,
            embeddings,
            understanding: None,
            config,
        }
    }

    /// Merge understanding output into lexical queries when
    /// `retrieval.use_understanding` is on.
    pub fn with_understanding(mut self, understanding: Arc<QueryUnderstandingService>) -> Self {
        self.understanding = Some(understanding);
        self
    }

    pub fn executor(&self) -> &HybridQueryExecutor {
        &self.executor
    }

    /// Strategy for `request` given the embedding service's current health.
    pub fn decide(&self, request: &RetrievalRequest) -> RetrievalDecision {
        let status = VectorServiceStatus::from_available(self.embeddings.is_service_available());
        decide_retrieval_strategy(request, status, &self.config)
    }

    pub fn search(&self, request: &RetrievalRequest) -> Result<SearchOutcome, SearchFailure> {
        let decision = self.decide(request);
        if let Err(e) = request.validate() {
            warn!(error = %e, "search request rejected");
            return Err(SearchFailure {
                metadata: SearchMetadata::from_decision(&decision),
                error: e.into(),
            });
        }

        let understood = match (&self.understanding, self.config.use_understanding) {
            (Some(service), true) => Some(service.understand_query(&request.free_text)),
            _ => None,
        };
        self.executor
            .execute_with_enrichment(decision, request, understood.as_ref())
    }
}
