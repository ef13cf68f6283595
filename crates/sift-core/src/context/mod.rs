pub mod enrichment;
pub mod entity;
pub mod intent;
pub mod query_context;

pub use enrichment::{HotTopicMatch, MatchReason, SemanticCandidate, SynonymCandidate, SynonymSource};
pub use entity::{Entity, EntityType};
pub use intent::Intent;
pub use query_context::QueryContext;
