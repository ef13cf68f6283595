use std::sync::Arc;

use sift_cache::CacheGateway;
use sift_core::config::SiftConfig;
use sift_core::constants::{
    STAGE_DISAMBIGUATION, STAGE_ENTITY, STAGE_HOT_TOPIC, STAGE_INTENT, STAGE_NORMALIZATION, STAGE_QUERY_BUILDER,
    STAGE_REWRITE, STAGE_SEMANTIC, STAGE_SYNONYM,
};
use sift_core::context::QueryContext;
use sift_core::models::StructuredQuery;
use sift_core::traits::{IEmbeddingService, IHotTopicStore, ILanguageService};
use sift_observability::PipelineMetrics;
use tracing::{debug, warn};

use crate::intent_adjustment::{IntentAdjustment, RecordOnlyAdjustment};
use crate::lexicon::{SynonymDictionary, Vocabulary};
use crate::pipeline::QueryPipeline;
use crate::stage::QueryStage;
use crate::stages::{
    DisambiguationStage, EntityExtractionStage, HotTopicStage, IntentRecognitionStage, NormalizationStage, QueryBuilderStage,
    QueryRewriteStage, SemanticExpansionStage, SynonymExpansionStage,
};

/// Optional collaborators. A missing port drops the stages that need it.
#[derive(Default, Clone)]
pub struct UnderstandingPorts {
    pub embeddings: Option<Arc<dyn IEmbeddingService>>,
    pub language: Option<Arc<dyn ILanguageService>>,
    pub hot_topics: Option<Arc<dyn IHotTopicStore>>,
    pub cache: Option<CacheGateway>,
    pub adjustment: Option<Arc<dyn IntentAdjustment>>,
    pub metrics: Option<Arc<PipelineMetrics>>,
}

/// Entry point: raw query in, enriched context out.
pub struct QueryUnderstandingService {
    pipeline: QueryPipeline,
}

impl QueryUnderstandingService {
    pub fn new(pipeline: QueryPipeline) -> Self {
        Self { pipeline }
    }

    /// Wire the built-in stages from configuration.
    pub fn from_config(config: &SiftConfig, ports: UnderstandingPorts) -> Self {
        let metrics = ports.metrics.unwrap_or_default();
        let mut pipeline = QueryPipeline::new(config.pipeline.clone(), ports.cache.clone(), metrics);
        let stages = &config.stages;
        let expansion = &config.expansion;

        let mut add = |stage: Box<dyn QueryStage>| {
            debug!(stage = stage.name(), priority = stage.settings().priority, "stage registered");
            pipeline.register(stage);
        };

        add(Box::new(NormalizationStage::new(
            stages.resolve(STAGE_NORMALIZATION, NormalizationStage::DEFAULT_SETTINGS),
            expansion.lowercase,
        )));
        add(Box::new(SynonymExpansionStage::new(
            stages.resolve(STAGE_SYNONYM, SynonymExpansionStage::DEFAULT_SETTINGS),
            Arc::new(SynonymDictionary::from_config(expansion)),
            expansion.max_synonyms,
            ports.cache.clone(),
        )));
        match ports.embeddings {
            Some(embeddings) => add(Box::new(SemanticExpansionStage::new(
                stages.resolve(STAGE_SEMANTIC, SemanticExpansionStage::DEFAULT_SETTINGS),
                embeddings,
                Arc::new(Vocabulary::from_config(expansion)),
                expansion.semantic_threshold,
                expansion.max_semantic_terms,
            ))),
            None => warn!("no embedding service, semantic expansion disabled"),
        }
        if let Some(store) = ports.hot_topics {
            add(Box::new(HotTopicStage::new(
                stages.resolve(STAGE_HOT_TOPIC, HotTopicStage::DEFAULT_SETTINGS),
                store,
            )));
        }
        if let Some(language) = ports.language {
            add(Box::new(IntentRecognitionStage::new(
                stages.resolve(STAGE_INTENT, IntentRecognitionStage::DEFAULT_SETTINGS),
                Arc::clone(&language),
            )));
            add(Box::new(EntityExtractionStage::new(
                stages.resolve(STAGE_ENTITY, EntityExtractionStage::DEFAULT_SETTINGS),
                Arc::clone(&language),
            )));
            let mut rewrite = stages.resolve(STAGE_REWRITE, QueryRewriteStage::DEFAULT_SETTINGS);
            rewrite.enabled &= config.llm.rewrite_enabled;
            add(Box::new(QueryRewriteStage::new(rewrite, language)));
        }
        add(Box::new(DisambiguationStage::from_config(
            stages.resolve(STAGE_DISAMBIGUATION, DisambiguationStage::DEFAULT_SETTINGS),
            expansion,
        )));
        add(Box::new(QueryBuilderStage::new(
            stages.resolve(STAGE_QUERY_BUILDER, QueryBuilderStage::DEFAULT_SETTINGS),
            ports.adjustment.unwrap_or_else(|| Arc::new(RecordOnlyAdjustment)),
        )));

        Self::new(pipeline)
    }

    /// Understand `raw`. Blank input skips every stage and gets match_all.
    pub fn understand_query(&self, raw: &str) -> QueryContext {
        if raw.trim().is_empty() {
            let mut ctx = QueryContext::new(raw);
            if let Err(e) = ctx.set_final_query(StructuredQuery::match_all()) {
                warn!(error = %e, "match_all rejected on fresh context");
            }
            return ctx;
        }
        self.pipeline.execute(raw)
    }

    pub fn pipeline(&self) -> &QueryPipeline {
        &self.pipeline
    }

    pub fn metrics(&self) -> &Arc<PipelineMetrics> {
        self.pipeline.metrics()
    }
}
