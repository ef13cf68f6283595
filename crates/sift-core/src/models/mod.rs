pub mod engine;
pub mod hot_topic;
pub mod retrieval_decision;
pub mod retrieval_request;
pub mod search_metadata;
pub mod structured_query;

pub use engine::{EngineRequest, EngineResponse, KnnClause, SearchHit};
pub use hot_topic::HotTopic;
pub use retrieval_decision::{DecisionTimings, RetrievalDecision, Strategy, VectorServiceStatus};
pub use retrieval_request::{PinyinMode, PinyinOptions, RetrievalRequest, SemanticMode, SemanticOptions};
pub use search_metadata::SearchMetadata;
pub use structured_query::{
    BoolQuery, FieldBoost, MatchQuery, MultiMatchQuery, MultiMatchType, Operator, StructuredQuery,
};
