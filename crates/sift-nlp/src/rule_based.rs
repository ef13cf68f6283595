//! Offline language service: keyword intent rules and regex entities.

use regex::Regex;
use sift_core::context::{Entity, EntityType, Intent};
use sift_core::errors::{LanguageError, SiftResult};
use sift_core::traits::{ILanguageService, IntentRecognition};

use crate::confidence::{intent_confidence, COMMAND_KEYWORDS};

const QUESTION_MARKERS: [&str; 8] = ["什么", "怎么", "如何", "为什么", "哪", "吗", "多少", "是否"];
const NAVIGATION_MARKERS: [&str; 4] = ["入口", "页面", "首页", "在哪里"];
const COMPARISON_MARKERS: [&str; 4] = ["对比", "比较", "区别", "哪个好"];
const LIST_MARKERS: [&str; 3] = ["列表", "有哪些", "全部"];

pub struct RuleBasedLanguageService {
    money: Regex,
    date: Regex,
}

impl RuleBasedLanguageService {
    pub fn new() -> SiftResult<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| LanguageError::ServiceUnavailable {
                service: format!("rule-based: {e}"),
            })
        };
        Ok(Self {
            money: compile(r"\d+(?:\.\d+)?\s*(?:万元|万|元|块)")?,
            date: compile(
                r"\d{4}年(?:\d{1,2}月)?(?:\d{1,2}[日号])?|\d{1,2}月\d{1,2}[日号]|今天|明天|昨天|本周|本月|上月|今年|去年",
            )?,
        })
    }

    fn classify(query: &str) -> Intent {
        if COMPARISON_MARKERS.iter().any(|m| query.contains(m)) {
            Intent::Comparison
        } else if NAVIGATION_MARKERS.iter().any(|m| query.contains(m)) {
            Intent::Navigation
        } else if query.contains('?') || query.contains('？') || QUESTION_MARKERS.iter().any(|m| query.contains(m)) {
            Intent::Question
        } else if LIST_MARKERS.iter().any(|m| query.contains(m)) {
            Intent::List
        } else if COMMAND_KEYWORDS.iter().any(|m| query.contains(m)) {
            Intent::Command
        } else {
            Intent::Query
        }
    }
}

impl ILanguageService for RuleBasedLanguageService {
    fn recognize_intent(&self, query: &str) -> SiftResult<IntentRecognition> {
        let intent = Self::classify(query);
        Ok(IntentRecognition {
            intent,
            confidence: intent_confidence(intent, query),
        })
    }

    fn extract_entities(&self, query: &str) -> SiftResult<Vec<Entity>> {
        let mut entities: Vec<Entity> = Vec::new();
        for (re, kind) in [(&self.money, EntityType::Money), (&self.date, EntityType::DateTime)] {
            for m in re.find_iter(query) {
                let position = query[..m.start()].chars().count();
                entities.push(Entity::new(m.as_str(), kind).at(position));
            }
        }
        entities.sort_by_key(|e| e.position);
        Ok(entities)
    }

    fn rewrite_query(&self, query: &str, _intent: Intent, _entities: &[Entity]) -> SiftResult<String> {
        Ok(query.to_string())
    }

    fn name(&self) -> &str {
        "rule-based"
    }

    fn is_service_available(&self) -> bool {
        true
    }
}
