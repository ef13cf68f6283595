use proptest::prelude::*;
use sift_core::config::RetrievalConfig;
use sift_core::models::{RetrievalRequest, SemanticMode, Strategy as Composition, VectorServiceStatus};
use sift_retrieval::decide_retrieval_strategy;

fn mode() -> impl Strategy<Value = SemanticMode> {
    prop_oneof![
        Just(SemanticMode::Auto),
        Just(SemanticMode::KeywordFirst),
        Just(SemanticMode::SemanticFirst),
        Just(SemanticMode::Hybrid),
        Just(SemanticMode::KeywordOnly),
        Just(SemanticMode::SemanticOnly),
    ]
}

proptest! {
    #[test]
    fn decision_is_total_and_consistent(
        text in "\\PC{0,30}",
        mode in mode(),
        weight in proptest::option::of(-2.0f64..3.0),
        enabled in any::<bool>(),
        available in any::<bool>(),
    ) {
        let mut request = RetrievalRequest::new(text).with_semantic(mode, weight);
        request.semantic.enabled = enabled;
        let d = decide_retrieval_strategy(
            &request,
            VectorServiceStatus::from_available(available),
            &RetrievalConfig::default(),
        );

        prop_assert!((0.0..=1.0).contains(&d.semantic_weight));
        prop_assert!(d.keyword_enabled || d.semantic_enabled);
        if !available || !enabled {
            prop_assert_eq!(d.actual_strategy, Composition::Keyword);
            prop_assert!(!d.semantic_enabled);
        }
        if d.diverges_from_request() {
            prop_assert!(d.adjustment_reason.is_some());
        }
        prop_assert_eq!(d.semantic_enabled, d.actual_strategy != Composition::Keyword);
    }
}
