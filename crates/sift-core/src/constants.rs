/// Sift version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stage names. Also used as `[stages.<name>]` config keys and as the
/// prefix of `<name>_error` metadata entries.
pub const STAGE_NORMALIZATION: &str = "normalization";
pub const STAGE_SYNONYM: &str = "synonym_expansion";
pub const STAGE_SEMANTIC: &str = "semantic_expansion";
pub const STAGE_HOT_TOPIC: &str = "hot_topic";
pub const STAGE_INTENT: &str = "intent_recognition";
pub const STAGE_ENTITY: &str = "entity_extraction";
pub const STAGE_DISAMBIGUATION: &str = "disambiguation";
pub const STAGE_REWRITE: &str = "query_rewrite";
pub const STAGE_QUERY_BUILDER: &str = "query_builder";

/// Metadata keys written by the pipeline and its stages.
pub const META_SEMANTIC_SIMILARITY_PREFIX: &str = "semantic_similarity_";
pub const META_HOT_TOPIC_PREFIX: &str = "hot_topic_";
pub const META_SYNONYM_SOURCE_PREFIX: &str = "synonym_source_";
pub const META_INTENT_ADJUSTMENT: &str = "intent_adjustment";
pub const META_BUDGET_EXCEEDED: &str = "pipeline_budget_exceeded";
pub const META_REWRITE_APPLIED: &str = "query_rewrite_applied";
pub const META_ORIGINAL_BEFORE_REWRITE: &str = "original_before_rewrite";
pub const META_FALLBACK_QUERY: &str = "final_query_fallback";
pub const META_CACHE_HIT: &str = "cache_hit";
pub const META_DISAMBIGUATED_PREFIX: &str = "disambiguated_";
pub const META_AMBIGUOUS_PREFIX: &str = "ambiguous_";

/// Degradation reasons reported in `adjustmentReason`.
pub const REASON_VECTOR_UNAVAILABLE: &str = "vector service unavailable";
pub const REASON_VECTOR_FAILED: &str = "vector generation failed";
pub const REASON_SHORT_QUERY: &str = "query too short for semantic search";
pub const REASON_SEMANTIC_DISABLED: &str = "semantic search disabled by request";
