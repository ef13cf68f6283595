use std::sync::Arc;

use proptest::prelude::*;
use sift_core::config::SiftConfig;
use sift_core::context::QueryContext;
use sift_nlp::RuleBasedLanguageService;
use sift_understanding::stages::normalization::normalize;
use sift_understanding::stages::query_builder::consolidate;
use sift_understanding::{QueryUnderstandingService, UnderstandingPorts};

fn service() -> QueryUnderstandingService {
    let ports = UnderstandingPorts {
        language: Some(Arc::new(RuleBasedLanguageService::new().unwrap())),
        ..Default::default()
    };
    QueryUnderstandingService::from_config(&SiftConfig::default(), ports)
}

proptest! {
    #[test]
    fn understand_query_is_total(raw in "\\PC{0,40}") {
        let ctx = service().understand_query(&raw);
        prop_assert!(ctx.final_query().is_some());
        prop_assert!(ctx.synonyms().len() <= 5);
        prop_assert!(ctx.related_terms().len() <= 5);
        prop_assert_eq!(ctx.original_query(), raw.as_str());
    }

    #[test]
    fn normalize_is_idempotent(raw in "\\PC{0,40}", lowercase in any::<bool>()) {
        let once = normalize(&raw, lowercase);
        prop_assert_eq!(normalize(&once, lowercase), once.clone());
        prop_assert!(!once.contains("  "));
        prop_assert_eq!(once.trim(), once.as_str());
    }

    #[test]
    fn consolidation_is_deterministic(query in "[a-z缴费查询 ]{0,12}", syns in proptest::collection::vec("[a-z]{1,4}", 0..4)) {
        let mut ctx = QueryContext::new(query);
        for s in syns {
            ctx.add_synonym(s);
        }
        prop_assert_eq!(consolidate(&ctx), consolidate(&ctx));
    }
}
