//! Lexical and phonetic (pinyin) query shapes.

use sift_core::config::RetrievalConfig;
use sift_core::models::{BoolQuery, FieldBoost, MultiMatchQuery, Operator, PinyinMode, PinyinOptions, StructuredQuery};

const CJK_START: char = '\u{4E00}';
const CJK_END: char = '\u{9FA5}';

pub fn contains_chinese(text: &str) -> bool {
    text.chars().any(|c| (CJK_START..=CJK_END).contains(&c))
}

/// Chinese text short enough that phonetic fields over-match.
pub fn is_short_chinese(text: &str, max_chars: usize) -> bool {
    contains_chinese(text) && text.chars().count() <= max_chars
}

fn parse_fields(fields: &[String]) -> Vec<FieldBoost> {
    fields.iter().map(|f| FieldBoost::parse(f)).collect()
}

fn clause(text: &str, fields: &[String], operator: Operator, boost: f32) -> Option<StructuredQuery> {
    if fields.is_empty() {
        return None;
    }
    Some(StructuredQuery::MultiMatch(
        MultiMatchQuery::new(text, parse_fields(fields)).operator(operator).boost(boost),
    ))
}

/// Build the lexical part of a search for `text`.
///
/// Plain fields match with AND; pinyin and first-letter fields with OR.
pub fn build_lexical_query(text: &str, pinyin: PinyinOptions, config: &RetrievalConfig) -> StructuredQuery {
    let text = text.trim();
    if text.is_empty() {
        return StructuredQuery::match_all();
    }
    if !pinyin.enabled {
        return StructuredQuery::MultiMatch(
            MultiMatchQuery::new(text, parse_fields(&config.searchable_fields)).operator(Operator::And),
        );
    }

    let short = is_short_chinese(text, config.short_query_max_chars);
    let (boosts, with_pinyin, with_initials) = match pinyin.mode {
        PinyinMode::Auto => (config.phonetic.auto, !short, !short),
        PinyinMode::Strict => (config.phonetic.strict, true, !short),
        PinyinMode::Fuzzy => (config.phonetic.fuzzy, true, true),
    };
    let [field_boost, pinyin_boost, initial_boost] = boosts;

    let mut should = Vec::with_capacity(3);
    should.extend(clause(text, &config.searchable_fields, Operator::And, field_boost));
    if with_pinyin {
        should.extend(clause(text, &config.pinyin_fields, Operator::Or, pinyin_boost));
    }
    if with_initials {
        should.extend(clause(text, &config.first_letter_fields, Operator::Or, initial_boost));
    }
    if should.is_empty() {
        return StructuredQuery::match_all();
    }
    StructuredQuery::Bool(BoolQuery {
        should,
        minimum_should_match: Some(1),
        ..BoolQuery::default()
    })
}
