use std::sync::Arc;

use sift_core::config::defaults::{HOT_TOPIC_PRIORITY, HOT_TOPIC_TIMEOUT_MS};
use sift_core::config::StageSettings;
use sift_core::constants::{META_HOT_TOPIC_PREFIX, STAGE_HOT_TOPIC};
use sift_core::context::{HotTopicMatch, MatchReason, QueryContext};
use sift_core::errors::SiftResult;
use sift_core::models::HotTopic;
use sift_core::traits::IHotTopicStore;

use crate::stage::QueryStage;

/// Attaches trending topics that relate to the query.
pub struct HotTopicStage {
    settings: StageSettings,
    store: Arc<dyn IHotTopicStore>,
}

impl HotTopicStage {
    pub const DEFAULT_SETTINGS: StageSettings = StageSettings::new(HOT_TOPIC_PRIORITY, HOT_TOPIC_TIMEOUT_MS);

    pub fn new(settings: StageSettings, store: Arc<dyn IHotTopicStore>) -> Self {
        Self { settings, store }
    }

    /// Visible topics matching `query`, most popular first.
    pub fn matching_topics(&self, query: &str) -> SiftResult<Vec<HotTopicMatch>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let lowered = query.to_lowercase();
        Ok(self
            .store
            .visible_topics()?
            .into_iter()
            .filter_map(|topic| {
                match_reason(&topic, query, &lowered).map(|match_reason| HotTopicMatch {
                    name: topic.name,
                    popularity: topic.popularity,
                    match_reason,
                })
            })
            .collect())
    }
}

fn match_reason(topic: &HotTopic, query: &str, lowered: &str) -> Option<MatchReason> {
    if query.contains(topic.name.as_str()) || topic.name.contains(query) {
        Some(MatchReason::Substring)
    } else if !topic.phonetic.is_empty() && topic.phonetic.to_lowercase().contains(lowered) {
        Some(MatchReason::Phonetic)
    } else if !topic.phonetic_initial.is_empty() && topic.phonetic_initial.to_lowercase().contains(lowered) {
        Some(MatchReason::PhoneticInitial)
    } else {
        None
    }
}

impl QueryStage for HotTopicStage {
    fn name(&self) -> &str {
        STAGE_HOT_TOPIC
    }

    fn settings(&self) -> StageSettings {
        self.settings
    }

    fn process(&self, ctx: &mut QueryContext) -> SiftResult<()> {
        let matches = self.matching_topics(ctx.current_query())?;
        for m in matches {
            if ctx.add_hot_topic(m.name.clone()) {
                ctx.put_metadata(format!("{META_HOT_TOPIC_PREFIX}{}", m.name), m.popularity);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sift_core::errors::SiftError;

    use super::*;
    use crate::hot_topic_store::InMemoryHotTopicStore;

    fn stage() -> HotTopicStage {
        let store = InMemoryHotTopicStore::new(vec![
            HotTopic::new("生活服务", 120).with_phonetic("shenghuofuwu", "shfw"),
            HotTopic::new("缴费", 300).with_phonetic("jiaofei", "jf"),
            HotTopic::new("天气", 10).with_phonetic("tianqi", "tq"),
        ]);
        HotTopicStage::new(HotTopicStage::DEFAULT_SETTINGS, Arc::new(store))
    }

    #[test]
    fn substring_either_direction() {
        let names: Vec<String> = stage().matching_topics("生活").unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["生活服务"]);
        let names: Vec<String> = stage().matching_topics("我要缴费").unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["缴费"]);
    }

    #[test]
    fn phonetic_and_initials_match_case_insensitively() {
        let m = stage().matching_topics("JiaoFei").unwrap();
        assert_eq!(m[0].match_reason, MatchReason::Phonetic);
        let m = stage().matching_topics("SHFW").unwrap();
        assert_eq!(m[0].name, "生活服务");
        assert_eq!(m[0].match_reason, MatchReason::PhoneticInitial);
    }

    #[test]
    fn records_popularity_metadata() {
        let mut ctx = QueryContext::new("缴费");
        stage().process(&mut ctx).unwrap();
        assert_eq!(ctx.hot_topics(), ["缴费"]);
        assert_eq!(ctx.metadata_value("hot_topic_缴费"), Some(&serde_json::json!(300)));
    }

    struct FailingStore;

    impl IHotTopicStore for FailingStore {
        fn visible_topics(&self) -> SiftResult<Vec<HotTopic>> {
            Err(SiftError::HotTopicStore {
                reason: "offline".into(),
            })
        }
    }

    #[test]
    fn store_failure_surfaces_as_stage_error() {
        let s = HotTopicStage::new(HotTopicStage::DEFAULT_SETTINGS, Arc::new(FailingStore));
        let mut ctx = QueryContext::new("缴费");
        assert!(s.process(&mut ctx).is_err());
        assert!(ctx.hot_topics().is_empty());
    }
}
