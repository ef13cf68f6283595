use proptest::prelude::*;
use sift_core::config::EmbeddingConfig;
use sift_core::traits::IEmbeddingService;
use sift_embeddings::EmbeddingEngine;

fn engine() -> EmbeddingEngine {
    EmbeddingEngine::new(
        EmbeddingConfig {
            provider: "hashing".into(),
            dimensions: 64,
            ..Default::default()
        },
        None,
    )
}

proptest! {
    #[test]
    fn embedding_is_empty_or_full_width(s in "\\PC{0,40}") {
        let v = engine().generate_embedding(&s);
        prop_assert!(v.is_empty() || v.len() == 64);
    }

    #[test]
    fn similarity_is_bounded_and_finite(a in "[a-z缴费生活]{0,12}", b in "[a-z缴费生活]{0,12}") {
        let sim = engine().calculate_similarity(&a, &b);
        prop_assert!(sim.is_finite());
        prop_assert!((-1.0 - 1e-6..=1.0 + 1e-6).contains(&sim));
    }

    #[test]
    fn similarity_is_symmetric(a in "[a-z缴费生活]{1,12}", b in "[a-z缴费生活]{1,12}") {
        let e = engine();
        let ab = e.calculate_similarity(&a, &b);
        let ba = e.calculate_similarity(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-9);
    }
}
