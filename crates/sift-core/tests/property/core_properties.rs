use proptest::prelude::*;
use sift_core::context::QueryContext;
use sift_core::models::{RetrievalRequest, SemanticMode, StructuredQuery};
use sift_core::traits::IEmbeddingService;

struct Identity;

impl IEmbeddingService for Identity {
    fn generate_embedding(&self, _text: &str) -> Vec<f32> {
        Vec::new()
    }

    fn is_service_available(&self) -> bool {
        false
    }
}

proptest! {
    #[test]
    fn enrichment_lists_stay_unique(terms in prop::collection::vec("[a-c]{1,2}", 0..30)) {
        let mut ctx = QueryContext::new("q");
        for t in &terms {
            ctx.add_synonym(t.clone());
        }
        let mut seen = std::collections::HashSet::new();
        for s in ctx.synonyms() {
            prop_assert!(seen.insert(s.clone()), "duplicate {}", s);
        }
    }

    #[test]
    fn current_query_never_blank_after_rewrites(
        start in "[a-z]{1,8}",
        rewrites in prop::collection::vec("[ a-z]{0,4}", 0..10),
    ) {
        let mut ctx = QueryContext::new(start);
        for r in rewrites {
            ctx.set_current_query(r);
        }
        prop_assert!(!ctx.current_query().trim().is_empty());
    }

    #[test]
    fn cosine_is_bounded(
        a in prop::collection::vec(-100.0f32..100.0, 1..16),
        b in prop::collection::vec(-100.0f32..100.0, 1..16),
    ) {
        let sim = Identity.cosine_similarity(&a, &b);
        prop_assert!(sim.is_finite());
        prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&sim));
    }

    #[test]
    fn in_range_weights_validate(w in 0.0f64..=1.0) {
        let req = RetrievalRequest::new("x").with_semantic(SemanticMode::Hybrid, Some(w));
        prop_assert!(req.validate().is_ok());
    }

    #[test]
    fn first_final_query_write_wins(field in "[a-z]{1,6}", text in "[a-z]{1,6}") {
        let mut ctx = QueryContext::new("q");
        let first = StructuredQuery::match_field(field.clone(), text.clone(), None);
        ctx.set_final_query(first.clone()).unwrap();
        let _ = ctx.set_final_query(StructuredQuery::match_all());
        prop_assert_eq!(ctx.final_query(), Some(&first));
    }
}
