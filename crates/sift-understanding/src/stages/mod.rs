//! Built-in pipeline stages, listed in default execution order.

pub mod normalization;
pub mod synonym_expansion;
pub mod semantic_expansion;
pub mod hot_topic;
pub mod intent_recognition;
pub mod entity_extraction;
pub mod disambiguation;
pub mod query_rewrite;
pub mod query_builder;

pub use disambiguation::DisambiguationStage;
pub use entity_extraction::EntityExtractionStage;
pub use hot_topic::HotTopicStage;
pub use intent_recognition::IntentRecognitionStage;
pub use normalization::NormalizationStage;
pub use query_builder::QueryBuilderStage;
pub use query_rewrite::QueryRewriteStage;
pub use semantic_expansion::SemanticExpansionStage;
pub use synonym_expansion::SynonymExpansionStage;
