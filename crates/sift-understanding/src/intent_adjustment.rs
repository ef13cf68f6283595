use sift_core::context::Intent;
use sift_core::models::BoolQuery;

/// Policy hook letting the recognized intent reshape the query clauses.
///
/// Returns a short note that the query builder stores under
/// `intent_adjustment`.
pub trait IntentAdjustment: Send + Sync {
    fn adjust(&self, intent: Intent, confidence: Option<f64>, query: &mut BoolQuery) -> String;
}

/// Leaves every clause untouched and only notes which intent was seen.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordOnlyAdjustment;

impl IntentAdjustment for RecordOnlyAdjustment {
    fn adjust(&self, intent: Intent, _confidence: Option<f64>, _query: &mut BoolQuery) -> String {
        format!("{intent}: weights unchanged")
    }
}
