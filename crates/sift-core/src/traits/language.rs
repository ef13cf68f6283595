use serde::{Deserialize, Serialize};

use crate::context::{Entity, Intent};
use crate::errors::SiftResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntentRecognition {
    pub intent: Intent,
    pub confidence: f64,
}

/// Intent, entity and rewrite services.
pub trait ILanguageService: Send + Sync {
    fn recognize_intent(&self, query: &str) -> SiftResult<IntentRecognition>;

    fn extract_entities(&self, query: &str) -> SiftResult<Vec<Entity>>;

    /// A clearer phrasing of `query` given its intent and entities.
    /// Returning the input unchanged means "no rewrite".
    fn rewrite_query(&self, query: &str, intent: Intent, entities: &[Entity]) -> SiftResult<String>;

    fn name(&self) -> &str;

    fn is_service_available(&self) -> bool;
}
