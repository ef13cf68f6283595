use std::sync::Arc;

use sift_core::config::defaults::{QUERY_BUILDER_PRIORITY, QUERY_BUILDER_TIMEOUT_MS};
use sift_core::config::StageSettings;
use sift_core::constants::{META_INTENT_ADJUSTMENT, STAGE_QUERY_BUILDER};
use sift_core::context::QueryContext;
use sift_core::errors::SiftResult;
use sift_core::models::{BoolQuery, FieldBoost, MultiMatchQuery, StructuredQuery};
use tracing::debug;

use crate::intent_adjustment::{IntentAdjustment, RecordOnlyAdjustment};
use crate::stage::QueryStage;

const PRIMARY_FIELDS: &[(&str, f32)] = &[("title", 3.0), ("content", 2.0), ("keywords", 2.0), ("description", 1.0)];
const SYNONYM_FIELDS: &[(&str, f32)] = &[("title", 2.0), ("content", 1.0), ("keywords", 1.0)];
const RELATED_FIELDS: &[(&str, f32)] = &[("title", 1.5), ("content", 1.0), ("keywords", 1.5)];
const HOT_TOPIC_FIELDS: &[(&str, f32)] = &[("title", 4.0), ("keywords", 3.0), ("content", 2.0)];

fn fields(spec: &[(&str, f32)]) -> Vec<FieldBoost> {
    spec.iter()
        .map(|&(f, b)| {
            if (b - 1.0).abs() < f32::EPSILON {
                FieldBoost::new(f)
            } else {
                FieldBoost::boosted(f, b)
            }
        })
        .collect()
}

fn multi_match(text: &str, spec: &[(&str, f32)]) -> StructuredQuery {
    StructuredQuery::MultiMatch(MultiMatchQuery::new(text, fields(spec)))
}

/// Clauses derived from the context's enrichment, before any intent policy.
pub fn clauses(ctx: &QueryContext) -> BoolQuery {
    let mut query = BoolQuery::default();
    let current = ctx.current_query().trim();
    if !current.is_empty() {
        query.should.push(StructuredQuery::MultiMatch(
            MultiMatchQuery::new(current, fields(PRIMARY_FIELDS)).fuzziness("AUTO"),
        ));
    }
    query.should.extend(ctx.synonyms().iter().map(|s| multi_match(s, SYNONYM_FIELDS)));
    query.should.extend(ctx.related_terms().iter().map(|t| multi_match(t, RELATED_FIELDS)));
    query.should.extend(ctx.hot_topics().iter().map(|h| multi_match(h, HOT_TOPIC_FIELDS)));
    query.should.extend(ctx.entities().iter().filter_map(|e| {
        e.entity_type
            .search_field()
            .map(|field| StructuredQuery::match_field(field, e.text.clone(), None))
    }));
    query
}

/// Close a clause set: nothing ⇒ match_all, otherwise a bool query that
/// needs at least one should-clause when any exist.
pub fn finish(mut query: BoolQuery) -> StructuredQuery {
    if query.is_empty() {
        return StructuredQuery::match_all();
    }
    if !query.should.is_empty() {
        query.minimum_should_match = Some(1);
    }
    StructuredQuery::Bool(query)
}

/// Consolidate the context into a structured query with no intent policy.
pub fn consolidate(ctx: &QueryContext) -> StructuredQuery {
    finish(clauses(ctx))
}

/// Terminal stage: writes the context's final query.
pub struct QueryBuilderStage {
    settings: StageSettings,
    adjustment: Arc<dyn IntentAdjustment>,
}

impl QueryBuilderStage {
    pub const DEFAULT_SETTINGS: StageSettings = StageSettings::new(QUERY_BUILDER_PRIORITY, QUERY_BUILDER_TIMEOUT_MS);

    pub fn new(settings: StageSettings, adjustment: Arc<dyn IntentAdjustment>) -> Self {
        Self { settings, adjustment }
    }

    pub fn build(&self, ctx: &mut QueryContext) -> StructuredQuery {
        let mut query = clauses(ctx);
        let note = self.adjustment.adjust(ctx.intent(), ctx.intent_confidence(), &mut query);
        ctx.put_metadata(META_INTENT_ADJUSTMENT, note);
        finish(query)
    }
}

impl Default for QueryBuilderStage {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SETTINGS, Arc::new(RecordOnlyAdjustment))
    }
}

impl QueryStage for QueryBuilderStage {
    fn name(&self) -> &str {
        STAGE_QUERY_BUILDER
    }

    fn settings(&self) -> StageSettings {
        self.settings
    }

    fn is_terminal(&self) -> bool {
        true
    }

    fn process(&self, ctx: &mut QueryContext) -> SiftResult<()> {
        let query = self.build(ctx);
        debug!(clauses = query.clause_count(), "final query built");
        ctx.set_final_query(query)
    }
}

#[cfg(test)]
mod tests {
    use sift_core::context::{Entity, EntityType, Intent};
    use sift_core::models::StructuredQuery;

    use super::*;

    #[test]
    fn empty_context_builds_match_all() {
        let ctx = QueryContext::new("");
        assert!(consolidate(&ctx).is_match_all());
    }

    #[test]
    fn every_enrichment_becomes_a_should_clause() {
        let mut ctx = QueryContext::new("缴费");
        ctx.add_synonym("交费");
        ctx.add_related_term("支付");
        ctx.add_hot_topic("生活缴费");
        ctx.add_entity(Entity::new("北京", EntityType::Location));
        ctx.add_entity(Entity::new("发布会", EntityType::Event));

        match consolidate(&ctx) {
            StructuredQuery::Bool(b) => {
                assert!(b.must.is_empty());
                assert_eq!(b.should.len(), 5);
                assert_eq!(b.minimum_should_match, Some(1));
            }
            other => panic!("expected bool, got {other:?}"),
        }
    }

    #[test]
    fn primary_clause_boosts() {
        let dsl = consolidate(&QueryContext::new("缴费")).to_dsl();
        let primary = &dsl["bool"]["should"][0]["multi_match"];
        assert_eq!(primary["fuzziness"], "AUTO");
        assert_eq!(primary["fields"][0], "title^3");
        assert_eq!(primary["fields"][3], "description");
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let mut ctx = QueryContext::new("缴费 查询");
        ctx.add_synonym("交费");
        ctx.set_intent(Intent::Query, Some(0.7));
        let stage = QueryBuilderStage::default();
        stage.process(&mut ctx).unwrap();
        let first = ctx.final_query().cloned();
        stage.process(&mut ctx).unwrap();
        assert_eq!(ctx.final_query().cloned(), first);
        assert!(ctx.metadata_value("intent_adjustment").is_some());
    }

    struct RequireTitle;

    impl IntentAdjustment for RequireTitle {
        fn adjust(&self, _intent: Intent, _confidence: Option<f64>, query: &mut BoolQuery) -> String {
            query.must.push(StructuredQuery::match_field("title", "缴费", None));
            "title required".into()
        }
    }

    #[test]
    fn adjustment_can_add_must_clauses() {
        let stage = QueryBuilderStage::new(QueryBuilderStage::DEFAULT_SETTINGS, Arc::new(RequireTitle));
        let mut ctx = QueryContext::new("缴费");
        match stage.build(&mut ctx) {
            StructuredQuery::Bool(b) => assert_eq!(b.must.len(), 1),
            other => panic!("expected bool, got {other:?}"),
        }
    }
}
