//! Hybrid search scenarios against an in-process engine that records
//! every request it receives.

use std::sync::{Arc, Mutex};

use serde_json::json;
use sift_core::config::{RetrievalConfig, SiftConfig};
use sift_core::errors::{SearchError, SiftError, SiftResult};
use sift_core::models::{
    EngineRequest, EngineResponse, PinyinMode, RetrievalRequest, SearchHit, SemanticMode, Strategy,
    VectorServiceStatus,
};
use sift_core::traits::{IEmbeddingService, ISearchEngine};
use sift_observability::RetrievalMetrics;
use sift_retrieval::{decide_retrieval_strategy, HybridQueryExecutor, HybridSearchService};
use sift_understanding::{QueryUnderstandingService, UnderstandingPorts};

// ---------------------------------------------------------------------------
// Mock ports
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingEngine {
    requests: Mutex<Vec<EngineRequest>>,
    fail: bool,
}

impl RecordingEngine {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn last(&self) -> EngineRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

impl ISearchEngine for RecordingEngine {
    fn search(&self, request: &EngineRequest) -> SiftResult<EngineResponse> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(SearchError::EngineRejected {
                status: 503,
                body: "unavailable".into(),
            }
            .into());
        }
        Ok(EngineResponse {
            hits: vec![SearchHit {
                id: "doc-1".into(),
                score: 1.0,
                source: json!({ "title": "取款" }),
            }],
            total: 1,
            took_ms: Some(1),
        })
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Health is reported separately from whether vectors actually come back.
struct StubEmbeddings {
    healthy: bool,
    produces: bool,
}

impl IEmbeddingService for StubEmbeddings {
    fn generate_embedding(&self, text: &str) -> Vec<f32> {
        if self.produces && !text.is_empty() {
            vec![0.6, 0.8, 0.0]
        } else {
            Vec::new()
        }
    }

    fn is_service_available(&self) -> bool {
        self.healthy
    }
}

fn service(healthy: bool, produces: bool) -> (HybridSearchService, Arc<RecordingEngine>, Arc<RetrievalMetrics>) {
    let engine = Arc::new(RecordingEngine::default());
    let metrics = Arc::new(RetrievalMetrics::new());
    let svc = HybridSearchService::new(
        Arc::new(StubEmbeddings { healthy, produces }),
        engine.clone(),
        RetrievalConfig::default(),
        Arc::clone(&metrics),
    );
    (svc, engine, metrics)
}

// ---------------------------------------------------------------------------
// Strategy selection
// ---------------------------------------------------------------------------

#[test]
fn fixture_strategy_cases() {
    for case in test_fixtures::strategy_cases() {
        let mode: SemanticMode = serde_json::from_value(json!(case.mode)).unwrap();
        let mut request = RetrievalRequest::new(&case.text).with_semantic(mode, case.weight);
        request.semantic.enabled = case.semantic_enabled;
        let d = decide_retrieval_strategy(
            &request,
            VectorServiceStatus::from_available(case.vector_available),
            &RetrievalConfig::default(),
        );
        assert_eq!(d.actual_strategy.as_str(), case.expect_strategy, "{}", case.name);
        assert!((d.semantic_weight - case.expect_weight).abs() < 1e-9, "{}", case.name);
        assert_eq!(d.adjustment_reason.is_some(), case.expect_reason, "{}", case.name);
        if d.diverges_from_request() {
            assert!(d.adjustment_reason.is_some(), "{}", case.name);
        }
    }
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

#[test]
fn hybrid_request_blends_lexical_and_knn() {
    let (svc, engine, _) = service(true, true);
    let request = RetrievalRequest::new("我想取钱").with_semantic(SemanticMode::Auto, Some(0.3));
    let outcome = svc.search(&request).unwrap();

    assert_eq!(outcome.metadata.actual_query_type, Strategy::Hybrid);
    assert!((outcome.metadata.semantic_weight - 0.3).abs() < 1e-9);
    assert_eq!(outcome.hits.len(), 1);

    let dsl = engine.last().to_dsl();
    assert_eq!(dsl["knn"]["boost"], json!(0.3));
    assert_eq!(dsl["knn"]["field"], "content_vector");
    assert_eq!(dsl["query"]["bool"]["boost"], json!(0.7));
}

#[test]
fn metadata_uses_wire_names() {
    let (svc, _, _) = service(true, true);
    let outcome = svc.search(&RetrievalRequest::new("我想取钱")).unwrap();
    let wire = serde_json::to_value(&outcome.metadata).unwrap();
    for key in [
        "searchMode",
        "actualQueryType",
        "semanticEnabled",
        "vectorServiceStatus",
        "adjustmentReason",
        "queryLength",
        "totalTime",
        "queryBuildTime",
        "vectorGenerationTime",
        "semanticWeight",
    ] {
        assert!(wire.get(key).is_some(), "missing {key}");
    }
    assert_eq!(wire["searchMode"], "AUTO");
    assert_eq!(wire["actualQueryType"], "hybrid");
    assert_eq!(wire["vectorServiceStatus"], "available");
}

#[test]
fn short_query_sends_no_vector() {
    let (svc, engine, metrics) = service(true, true);
    let outcome = svc.search(&RetrievalRequest::new("钱")).unwrap();
    assert_eq!(outcome.metadata.actual_query_type, Strategy::Keyword);
    assert!(outcome.metadata.adjustment_reason.is_some());
    let sent = engine.last();
    assert!(sent.knn.is_none());
    assert!(sent.query.is_some());
    assert_eq!(metrics.snapshot().degraded, 1);
}

#[test]
fn down_service_degrades_before_execution() {
    let (svc, engine, _) = service(false, false);
    let request = RetrievalRequest::new("我想取钱").with_semantic(SemanticMode::Hybrid, Some(0.3));
    let outcome = svc.search(&request).unwrap();
    assert_eq!(outcome.metadata.actual_query_type, Strategy::Keyword);
    assert!(!outcome.metadata.semantic_enabled);
    assert_eq!(outcome.metadata.adjustment_reason.as_deref(), Some("vector service unavailable"));
    assert!(engine.last().knn.is_none());
}

#[test]
fn failed_vector_generation_degrades_to_keyword() {
    let (svc, engine, metrics) = service(true, false);
    let request = RetrievalRequest::new("我想取钱").with_semantic(SemanticMode::SemanticOnly, None);
    let outcome = svc.search(&request).unwrap();

    assert_eq!(outcome.metadata.actual_query_type, Strategy::Keyword);
    assert_eq!(outcome.metadata.adjustment_reason.as_deref(), Some("vector generation failed"));
    assert_eq!(outcome.metadata.semantic_weight, 0.0);
    let sent = engine.last();
    assert!(sent.knn.is_none());
    // semantic-only had no lexical part; degradation restores one
    assert!(sent.query.is_some());
    assert_eq!(metrics.snapshot().vector_failures, 1);
}

#[test]
fn semantic_only_sends_only_knn() {
    let (svc, engine, _) = service(true, true);
    let request = RetrievalRequest::new("我想取钱").with_semantic(SemanticMode::SemanticOnly, None);
    svc.search(&request).unwrap();
    let sent = engine.last();
    assert!(sent.query.is_none());
    assert_eq!(sent.knn.map(|k| k.boost), Some(1.0));
}

#[test]
fn paging_maps_to_offset() {
    let (svc, engine, _) = service(true, true);
    svc.search(&RetrievalRequest::new("我想取钱").with_page(3, 10)).unwrap();
    let sent = engine.last();
    assert_eq!((sent.from, sent.size), (20, 10));
}

#[test]
fn invalid_request_is_rejected_with_metadata() {
    let (svc, engine, _) = service(true, true);
    let request = RetrievalRequest::new("我想取钱").with_semantic(SemanticMode::Hybrid, Some(1.5));
    let failure = svc.search(&request).unwrap_err();
    assert!(matches!(failure.error, SiftError::ConfigError(_)));
    assert_eq!(failure.metadata.query_length, 4);
    assert!(engine.requests.lock().unwrap().is_empty());
}

#[test]
fn engine_failure_carries_partial_metadata() {
    let metrics = Arc::new(RetrievalMetrics::new());
    let executor = HybridQueryExecutor::new(
        Arc::new(StubEmbeddings {
            healthy: true,
            produces: true,
        }),
        Arc::new(RecordingEngine::failing()),
        RetrievalConfig::default(),
        Arc::clone(&metrics),
    );
    let request = RetrievalRequest::new("我想取钱").with_semantic(SemanticMode::Hybrid, None);
    let decision = decide_retrieval_strategy(&request, VectorServiceStatus::Available, &RetrievalConfig::default());
    let failure = executor.execute_hybrid_search(decision, &request).unwrap_err();

    assert!(matches!(failure.error, SiftError::SearchError(SearchError::EngineRejected { status: 503, .. })));
    assert_eq!(failure.metadata.actual_query_type, Strategy::Hybrid);
    assert_eq!(metrics.snapshot().engine_failures, 1);
}

#[test]
fn pinyin_mode_shapes_lexical_clause() {
    let (svc, engine, _) = service(false, false);
    svc.search(&RetrievalRequest::new("生活缴费").with_pinyin(true, PinyinMode::Fuzzy)).unwrap();
    let dsl = engine.last().to_dsl();
    let should = dsl["query"]["bool"]["should"].as_array().unwrap();
    assert_eq!(should.len(), 3);
    assert_eq!(should[1]["multi_match"]["boost"], json!(2.0));
}

#[test]
fn understanding_output_is_merged_when_enabled() {
    let engine = Arc::new(RecordingEngine::default());
    let config = RetrievalConfig {
        use_understanding: true,
        ..RetrievalConfig::default()
    };
    let understanding = Arc::new(QueryUnderstandingService::from_config(
        &SiftConfig::default(),
        UnderstandingPorts::default(),
    ));
    let svc = HybridSearchService::new(
        Arc::new(StubEmbeddings {
            healthy: false,
            produces: false,
        }),
        engine.clone(),
        config,
        Arc::new(RetrievalMetrics::new()),
    )
    .with_understanding(understanding);

    svc.search(&RetrievalRequest::new("缴费查询")).unwrap();
    let dsl = engine.last().to_dsl();
    let outer = dsl["query"]["bool"]["should"].as_array().unwrap();
    assert_eq!(outer.len(), 2);
    // second branch is the understood query, primary clause boosted on title^3
    assert_eq!(outer[1]["bool"]["should"][0]["multi_match"]["fields"][0], "title^3");
}
