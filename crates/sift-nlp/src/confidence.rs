use sift_core::context::Intent;

/// Verbs that mark an imperative query.
pub const COMMAND_KEYWORDS: [&str; 6] = ["打开", "关闭", "删除", "创建", "修改", "设置"];

const BASELINE: f64 = 0.7;

/// Heuristic confidence for an intent label on `query`.
///
/// Questions ending in `?`/`？` and commands containing a command verb
/// score higher than the baseline.
pub fn intent_confidence(intent: Intent, query: &str) -> f64 {
    let mut confidence = BASELINE;
    if intent == Intent::Question && (query.contains('?') || query.contains('？')) {
        confidence = 0.9;
    }
    if intent == Intent::Command && COMMAND_KEYWORDS.iter().any(|k| query.contains(k)) {
        confidence = 0.85;
    }
    confidence
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_for_plain_query() {
        assert_eq!(intent_confidence(Intent::Query, "生活缴费"), 0.7);
    }

    #[test]
    fn question_mark_boosts_question() {
        assert_eq!(intent_confidence(Intent::Question, "怎么缴费？"), 0.9);
        // Question mark without the QUESTION label stays at baseline.
        assert_eq!(intent_confidence(Intent::Query, "怎么缴费?"), 0.7);
    }

    #[test]
    fn command_verb_boosts_command() {
        assert_eq!(intent_confidence(Intent::Command, "打开自动缴费"), 0.85);
        assert_eq!(intent_confidence(Intent::Command, "自动缴费"), 0.7);
    }
}
