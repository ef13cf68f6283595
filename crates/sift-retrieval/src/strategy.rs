//! Retrieval strategy selection.
//!
//! A pure function of the request, live vector-service health and the
//! configured defaults. It never fails; out-of-range weights are clamped.

use sift_core::config::RetrievalConfig;
use sift_core::constants::{REASON_SEMANTIC_DISABLED, REASON_SHORT_QUERY, REASON_VECTOR_UNAVAILABLE};
use sift_core::models::{
    DecisionTimings, RetrievalDecision, RetrievalRequest, SemanticMode, Strategy, VectorServiceStatus,
};
use sift_observability::tracing_setup::events;

/// Semantic share for AUTO requests that carry no weight, tiered by query length.
pub fn auto_weight(query_length: usize) -> f64 {
    match query_length {
        0..=5 => 0.2,
        6..=10 => 0.4,
        _ => 0.6,
    }
}

fn clamp_weight(weight: f64) -> Option<f64> {
    weight.is_finite().then(|| weight.clamp(0.0, 1.0))
}

/// Choose keyword, semantic or hybrid retrieval for `request`.
pub fn decide_retrieval_strategy(
    request: &RetrievalRequest,
    status: VectorServiceStatus,
    config: &RetrievalConfig,
) -> RetrievalDecision {
    let mode = request.semantic.mode;
    let query_length = request.query_length();
    let requested = request.semantic.weight.and_then(clamp_weight);

    let mut decision = RetrievalDecision {
        requested_mode: mode,
        actual_strategy: Strategy::Keyword,
        keyword_enabled: true,
        semantic_enabled: false,
        semantic_weight: 0.0,
        vector_service_status: status,
        adjustment_reason: None,
        query_length,
        timings: DecisionTimings::default(),
    };

    if !status.is_available() {
        decision.adjustment_reason = Some(REASON_VECTOR_UNAVAILABLE.to_string());
    } else if !request.semantic.enabled {
        if mode.implies_semantic() {
            decision.adjustment_reason = Some(REASON_SEMANTIC_DISABLED.to_string());
        }
    } else {
        match mode {
            SemanticMode::KeywordFirst | SemanticMode::KeywordOnly => {}
            SemanticMode::SemanticFirst => {
                use_vectors(&mut decision, Strategy::Semantic, requested.unwrap_or_else(|| mode.default_weight()));
            }
            SemanticMode::SemanticOnly => {
                use_vectors(&mut decision, Strategy::Semantic, mode.default_weight());
                decision.keyword_enabled = false;
            }
            SemanticMode::Hybrid => {
                use_vectors(&mut decision, Strategy::Hybrid, requested.unwrap_or_else(|| mode.default_weight()));
            }
            SemanticMode::Auto if query_length <= config.short_query_max_chars => {
                decision.adjustment_reason = Some(REASON_SHORT_QUERY.to_string());
            }
            SemanticMode::Auto => {
                let weight = requested.unwrap_or_else(|| {
                    if config.length_tiered_auto_weight {
                        auto_weight(query_length)
                    } else {
                        config.default_semantic_weight.clamp(0.0, 1.0)
                    }
                });
                use_vectors(&mut decision, Strategy::Hybrid, weight);
            }
        }
    }

    events::strategy_decided(
        mode.as_str(),
        decision.actual_strategy.as_str(),
        decision.semantic_weight,
        decision.adjustment_reason.as_deref(),
    );
    decision
}

fn use_vectors(decision: &mut RetrievalDecision, strategy: Strategy, weight: f64) {
    decision.actual_strategy = strategy;
    decision.semantic_enabled = true;
    decision.semantic_weight = weight;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decide(text: &str, mode: SemanticMode, weight: Option<f64>, available: bool) -> RetrievalDecision {
        let request = RetrievalRequest::new(text).with_semantic(mode, weight);
        decide_retrieval_strategy(
            &request,
            VectorServiceStatus::from_available(available),
            &RetrievalConfig::default(),
        )
    }

    #[test]
    fn single_char_auto_is_keyword() {
        let d = decide("钱", SemanticMode::Auto, None, true);
        assert_eq!(d.actual_strategy, Strategy::Keyword);
        assert!(!d.semantic_enabled);
        assert_eq!(d.adjustment_reason.as_deref(), Some(REASON_SHORT_QUERY));
    }

    #[test]
    fn unavailable_service_overrides_hybrid() {
        let d = decide("我想取钱", SemanticMode::Hybrid, Some(0.3), false);
        assert_eq!(d.actual_strategy, Strategy::Keyword);
        assert!(!d.semantic_enabled);
        assert_eq!(d.vector_service_status, VectorServiceStatus::Unavailable);
        assert_eq!(d.adjustment_reason.as_deref(), Some(REASON_VECTOR_UNAVAILABLE));
    }

    #[test]
    fn auto_with_weight_is_hybrid() {
        let d = decide("我想取钱", SemanticMode::Auto, Some(0.3), true);
        assert_eq!(d.actual_strategy, Strategy::Hybrid);
        assert!(d.semantic_enabled);
        assert!((d.semantic_weight - 0.3).abs() < 1e-9);
        assert!(d.adjustment_reason.is_none());
        assert_eq!(d.query_length, 4);
    }

    #[test]
    fn weights_are_clamped() {
        assert_eq!(decide("我想取钱", SemanticMode::Hybrid, Some(1.7), true).semantic_weight, 1.0);
        assert_eq!(decide("我想取钱", SemanticMode::Hybrid, Some(-2.0), true).semantic_weight, 0.0);
        assert_eq!(decide("我想取钱", SemanticMode::Hybrid, Some(f64::NAN), true).semantic_weight, 0.5);
    }

    #[test]
    fn semantic_only_disables_lexical() {
        let d = decide("我想取钱", SemanticMode::SemanticOnly, Some(0.4), true);
        assert_eq!(d.actual_strategy, Strategy::Semantic);
        assert!(!d.keyword_enabled);
        assert_eq!(d.semantic_weight, 1.0);
    }

    #[test]
    fn untiered_auto_uses_configured_default() {
        let config = RetrievalConfig {
            length_tiered_auto_weight: false,
            ..RetrievalConfig::default()
        };
        let d = decide_retrieval_strategy(
            &RetrievalRequest::new("请问在哪里可以查询社保缴费记录"),
            VectorServiceStatus::Available,
            &config,
        );
        assert!((d.semantic_weight - 0.3).abs() < 1e-9);
    }

    #[test]
    fn tiers() {
        assert_eq!(auto_weight(3), 0.2);
        assert_eq!(auto_weight(5), 0.2);
        assert_eq!(auto_weight(6), 0.4);
        assert_eq!(auto_weight(10), 0.4);
        assert_eq!(auto_weight(11), 0.6);
    }
}
