use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::{Entity, Intent};
use crate::errors::{SiftError, SiftResult};
use crate::models::StructuredQuery;

/// Per-request carrier threaded through the understanding pipeline.
///
/// Enrichment lists only grow and never hold duplicates. `final_query` is
/// written once; the terminal stage owns that write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryContext {
    original_query: String,
    current_query: String,
    #[serde(default)]
    intent: Intent,
    #[serde(default)]
    intent_confidence: Option<f64>,
    #[serde(default)]
    entities: Vec<Entity>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    related_terms: Vec<String>,
    #[serde(default)]
    hot_topics: Vec<String>,
    #[serde(default)]
    stage_timings: BTreeMap<String, Duration>,
    #[serde(default)]
    metadata: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    skip_complex_processing: bool,
    #[serde(default)]
    final_query: Option<StructuredQuery>,
    #[serde(skip, default = "Instant::now")]
    started_at: Instant,
}

impl QueryContext {
    pub fn new(query: impl Into<String>) -> Self {
        let original_query = query.into();
        Self {
            current_query: original_query.clone(),
            original_query,
            intent: Intent::Unknown,
            intent_confidence: None,
            entities: Vec::new(),
            synonyms: Vec::new(),
            related_terms: Vec::new(),
            hot_topics: Vec::new(),
            stage_timings: BTreeMap::new(),
            metadata: BTreeMap::new(),
            skip_complex_processing: false,
            final_query: None,
            started_at: Instant::now(),
        }
    }

    pub fn original_query(&self) -> &str {
        &self.original_query
    }

    /// The text later stages should work on (normalized or rewritten).
    pub fn current_query(&self) -> &str {
        &self.current_query
    }

    /// Replace the working query. Blank replacements are ignored.
    pub fn set_current_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if query.trim().is_empty() {
            return false;
        }
        self.current_query = query;
        true
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn intent_confidence(&self) -> Option<f64> {
        self.intent_confidence
    }

    pub fn set_intent(&mut self, intent: Intent, confidence: Option<f64>) {
        self.intent = intent;
        self.intent_confidence = confidence.map(|c| c.clamp(0.0, 1.0));
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn add_entity(&mut self, entity: Entity) -> bool {
        if entity.text.trim().is_empty() || self.entities.contains(&entity) {
            return false;
        }
        self.entities.push(entity);
        true
    }

    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    pub fn add_synonym(&mut self, term: impl Into<String>) -> bool {
        push_unique(&mut self.synonyms, term.into())
    }

    pub fn related_terms(&self) -> &[String] {
        &self.related_terms
    }

    pub fn add_related_term(&mut self, term: impl Into<String>) -> bool {
        push_unique(&mut self.related_terms, term.into())
    }

    pub fn hot_topics(&self) -> &[String] {
        &self.hot_topics
    }

    pub fn add_hot_topic(&mut self, name: impl Into<String>) -> bool {
        push_unique(&mut self.hot_topics, name.into())
    }

    pub fn stage_timings(&self) -> &BTreeMap<String, Duration> {
        &self.stage_timings
    }

    pub fn record_stage_timing(&mut self, stage: impl Into<String>, elapsed: Duration) {
        self.stage_timings.insert(stage.into(), elapsed);
    }

    pub fn metadata(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.metadata
    }

    pub fn metadata_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }

    pub fn put_metadata(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Record a stage failure under `"<stage>_error"`.
    pub fn record_stage_error(&mut self, stage: &str, message: impl Into<String>) {
        self.metadata
            .insert(format!("{stage}_error"), serde_json::Value::String(message.into()));
    }

    pub fn stage_error(&self, stage: &str) -> Option<&str> {
        self.metadata
            .get(&format!("{stage}_error"))
            .and_then(serde_json::Value::as_str)
    }

    pub fn skip_complex_processing(&self) -> bool {
        self.skip_complex_processing
    }

    pub fn set_skip_complex_processing(&mut self, skip: bool) {
        self.skip_complex_processing = skip;
    }

    pub fn final_query(&self) -> Option<&StructuredQuery> {
        self.final_query.as_ref()
    }

    /// Write the consolidated query. An identical second write is a no-op;
    /// a different one is rejected.
    pub fn set_final_query(&mut self, query: StructuredQuery) -> SiftResult<()> {
        match &self.final_query {
            None => {
                self.final_query = Some(query);
                Ok(())
            }
            Some(existing) if *existing == query => Ok(()),
            Some(_) => Err(SiftError::FinalQueryConflict),
        }
    }

    /// Time since this context was created (or restored from cache).
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_timings.values().sum()
    }
}

fn push_unique(list: &mut Vec<String>, value: String) -> bool {
    if value.trim().is_empty() || list.contains(&value) {
        return false;
    }
    list.push(value);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_rewrite_keeps_current_query() {
        let mut ctx = QueryContext::new("缴费");
        assert!(!ctx.set_current_query("   "));
        assert_eq!(ctx.current_query(), "缴费");
    }

    #[test]
    fn enrichment_lists_reject_duplicates() {
        let mut ctx = QueryContext::new("q");
        assert!(ctx.add_synonym("交费"));
        assert!(!ctx.add_synonym("交费"));
        assert!(!ctx.add_related_term(""));
        assert_eq!(ctx.synonyms(), ["交费"]);
    }

    #[test]
    fn total_stage_time_sums_recorded_timings() {
        let mut ctx = QueryContext::new("q");
        assert_eq!(ctx.total_stage_time(), Duration::ZERO);
        ctx.record_stage_timing("normalization", Duration::from_millis(2));
        ctx.record_stage_timing("query_builder", Duration::from_millis(5));
        assert_eq!(ctx.total_stage_time(), Duration::from_millis(7));
    }

    #[test]
    fn stage_error_key_uses_stage_name() {
        let mut ctx = QueryContext::new("q");
        ctx.record_stage_error("hot_topic", "store down");
        assert_eq!(ctx.stage_error("hot_topic"), Some("store down"));
        assert!(ctx.metadata().contains_key("hot_topic_error"));
    }
}
