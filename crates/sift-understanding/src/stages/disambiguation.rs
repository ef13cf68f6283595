use std::collections::BTreeMap;

use sift_core::config::defaults::{DISAMBIGUATION_PRIORITY, DISAMBIGUATION_TIMEOUT_MS};
use sift_core::config::{ExpansionConfig, StageSettings, WordSense};
use sift_core::constants::{META_AMBIGUOUS_PREFIX, META_DISAMBIGUATED_PREFIX, STAGE_DISAMBIGUATION};
use sift_core::context::QueryContext;
use sift_core::errors::SiftResult;
use tracing::debug;

use crate::stage::QueryStage;

/// Picks a sense for ambiguous words in the query.
///
/// Evidence is tried in order: cue words in the query, then matched hot
/// topics, then extracted entity text. A resolved word is recorded as
/// `disambiguated_<word>`; an unresolved one lists every sense under
/// `ambiguous_<word>`.
pub struct DisambiguationStage {
    settings: StageSettings,
    senses: BTreeMap<String, Vec<WordSense>>,
}

impl DisambiguationStage {
    pub const DEFAULT_SETTINGS: StageSettings = StageSettings::new(DISAMBIGUATION_PRIORITY, DISAMBIGUATION_TIMEOUT_MS);

    pub fn new(settings: StageSettings, senses: BTreeMap<String, Vec<WordSense>>) -> Self {
        let senses = senses
            .into_iter()
            .filter(|(word, list)| !word.trim().is_empty() && !list.is_empty())
            .collect();
        Self { settings, senses }
    }

    pub fn from_config(settings: StageSettings, config: &ExpansionConfig) -> Self {
        Self::new(settings, config.ambiguous_words.clone())
    }

    /// Ambiguous words present in `query`, in table order.
    pub fn detect<'a>(&'a self, query: &str) -> Vec<&'a str> {
        self.senses
            .keys()
            .filter(|word| query.contains(word.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// The sense of `word` the context supports, if any.
    pub fn resolve(&self, word: &str, ctx: &QueryContext) -> Option<&str> {
        let senses = self.senses.get(word)?;
        let query = ctx.current_query();

        let by_cue = senses
            .iter()
            .find(|s| s.cues.iter().any(|cue| !cue.is_empty() && query.contains(cue.as_str())));
        let by_topic = || {
            senses.iter().find(|s| {
                ctx.hot_topics()
                    .iter()
                    .any(|topic| topic.contains(s.meaning.as_str()) || s.meaning.contains(topic.as_str()))
            })
        };
        let by_entity = || {
            senses
                .iter()
                .find(|s| ctx.entities().iter().any(|e| e.text.contains(s.meaning.as_str())))
        };

        by_cue.or_else(by_topic).or_else(by_entity).map(|s| s.meaning.as_str())
    }
}

impl QueryStage for DisambiguationStage {
    fn name(&self) -> &str {
        STAGE_DISAMBIGUATION
    }

    fn settings(&self) -> StageSettings {
        self.settings
    }

    fn process(&self, ctx: &mut QueryContext) -> SiftResult<()> {
        let words = self.detect(ctx.current_query());
        for word in words {
            match self.resolve(word, ctx).map(str::to_string) {
                Some(meaning) => {
                    debug!(word, meaning = %meaning, "ambiguous word resolved");
                    ctx.put_metadata(format!("{META_DISAMBIGUATED_PREFIX}{word}"), meaning);
                }
                None => {
                    let all: Vec<String> = self
                        .senses
                        .get(word)
                        .map(|list| list.iter().map(|s| s.meaning.clone()).collect())
                        .unwrap_or_default();
                    debug!(word, senses = all.len(), "ambiguous word left open");
                    ctx.put_metadata(format!("{META_AMBIGUOUS_PREFIX}{word}"), all);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sift_core::context::{Entity, EntityType};

    use super::*;

    fn stage() -> DisambiguationStage {
        DisambiguationStage::from_config(DisambiguationStage::DEFAULT_SETTINGS, &ExpansionConfig::default())
    }

    fn run(ctx: &mut QueryContext) {
        stage().process(ctx).unwrap();
    }

    #[test]
    fn cue_words_pick_a_sense() {
        let mut ctx = QueryContext::new("苹果手机维修");
        run(&mut ctx);
        assert_eq!(ctx.metadata_value("disambiguated_苹果"), Some(&json!("Apple公司")));

        let mut ctx = QueryContext::new("新鲜苹果");
        run(&mut ctx);
        assert_eq!(ctx.metadata_value("disambiguated_苹果"), Some(&json!("水果")));
    }

    #[test]
    fn hot_topics_pick_a_sense() {
        let mut ctx = QueryContext::new("充值");
        ctx.add_hot_topic("手机充值优惠");
        run(&mut ctx);
        assert_eq!(ctx.metadata_value("disambiguated_充值"), Some(&json!("手机充值")));
    }

    #[test]
    fn entities_pick_a_sense() {
        let mut ctx = QueryContext::new("锁 怎么解");
        ctx.add_entity(Entity::new("账号锁定", EntityType::Other));
        run(&mut ctx);
        assert_eq!(ctx.metadata_value("disambiguated_锁"), Some(&json!("账号锁定")));
    }

    #[test]
    fn unresolved_word_lists_every_sense() {
        let mut ctx = QueryContext::new("服务");
        run(&mut ctx);
        assert_eq!(
            ctx.metadata_value("ambiguous_服务"),
            Some(&json!(["客户服务", "系统服务", "公共服务"]))
        );
        assert!(ctx.metadata_value("disambiguated_服务").is_none());
    }

    #[test]
    fn every_detected_word_is_handled() {
        let mut ctx = QueryContext::new("苹果手机 充值服务");
        run(&mut ctx);
        assert_eq!(stage().detect(ctx.current_query()), ["充值", "服务", "苹果"]);
        assert!(ctx.metadata_value("disambiguated_苹果").is_some());
        assert!(ctx.metadata_value("ambiguous_充值").is_some());
        assert!(ctx.metadata_value("ambiguous_服务").is_some());
    }

    #[test]
    fn query_without_ambiguity_is_untouched() {
        let mut ctx = QueryContext::new("生活缴费");
        run(&mut ctx);
        assert!(ctx.metadata().is_empty());
    }

    #[test]
    fn runs_for_simple_queries() {
        let mut ctx = QueryContext::new("锁");
        ctx.set_skip_complex_processing(true);
        assert!(stage().should_process(&ctx));
    }
}
