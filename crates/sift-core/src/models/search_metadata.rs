use serde::{Deserialize, Serialize};

use super::{RetrievalDecision, SemanticMode, Strategy, VectorServiceStatus};

/// Explainability block returned with every search. Field names are part
/// of the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMetadata {
    pub search_mode: SemanticMode,
    pub actual_query_type: Strategy,
    pub semantic_enabled: bool,
    pub vector_service_status: VectorServiceStatus,
    pub adjustment_reason: Option<String>,
    pub query_length: usize,
    /// Milliseconds.
    pub total_time: u64,
    pub query_build_time: u64,
    pub vector_generation_time: u64,
    pub semantic_weight: f64,
}

impl SearchMetadata {
    pub fn from_decision(decision: &RetrievalDecision) -> Self {
        Self {
            search_mode: decision.requested_mode,
            actual_query_type: decision.actual_strategy,
            semantic_enabled: decision.semantic_enabled,
            vector_service_status: decision.vector_service_status,
            adjustment_reason: decision.adjustment_reason.clone(),
            query_length: decision.query_length,
            total_time: millis(decision.timings.total),
            query_build_time: millis(decision.timings.query_build),
            vector_generation_time: millis(decision.timings.vector_generation),
            semantic_weight: decision.semantic_weight,
        }
    }
}

fn millis(d: std::time::Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
