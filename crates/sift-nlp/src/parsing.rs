//! Parsing of free-form model answers.

use serde::Deserialize;
use sift_core::context::{Entity, EntityType, Intent};

/// Extract an intent label from a model answer such as `"QUESTION"` or
/// `"意图: COMMAND"`. Returns `None` when no known label appears.
pub fn parse_intent(response: &str) -> Option<Intent> {
    let upper = response.trim().to_ascii_uppercase();
    if let Ok(intent) = upper.parse::<Intent>() {
        if intent != Intent::Unknown {
            return Some(intent);
        }
    }
    // Longest labels first so INFORMATION_QUERY wins over QUERY.
    let mut labels: Vec<Intent> = Intent::ALL
        .iter()
        .copied()
        .filter(|i| *i != Intent::Unknown)
        .collect();
    labels.sort_by_key(|i| std::cmp::Reverse(i.as_str().len()));
    labels.into_iter().find(|i| upper.contains(i.as_str()))
}

/// Strip Markdown code fences and return the JSON body, or `"[]"` when the
/// answer does not look like JSON.
pub fn extract_json(response: &str) -> &str {
    let mut body = response.trim();
    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    let body = body.trim();
    if body.starts_with('[') || body.starts_with('{') {
        body
    } else {
        "[]"
    }
}

#[derive(Deserialize)]
struct RawEntity {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Parse an entity list answer. Unparseable answers yield no entities.
pub fn parse_entities(response: &str) -> Result<Vec<Entity>, serde_json::Error> {
    let raw: Vec<RawEntity> = serde_json::from_str(extract_json(response))?;
    Ok(raw
        .into_iter()
        .filter(|r| !r.text.trim().is_empty())
        .map(|r| Entity::new(r.text.trim(), entity_type(&r.kind)))
        .collect())
}

/// Map model-specific labels onto the closed entity set.
pub fn entity_type(label: &str) -> EntityType {
    match label.trim().to_ascii_uppercase().as_str() {
        "PERSON" | "PER" => EntityType::Person,
        "LOCATION" | "LOC" | "GPE" => EntityType::Location,
        "ORGANIZATION" | "ORG" => EntityType::Organization,
        "DATE_TIME" | "DATE" | "TIME" => EntityType::DateTime,
        "PRODUCT" | "ACCOUNT_TYPE" | "SERVICE" => EntityType::Product,
        "MONEY" | "AMOUNT" => EntityType::Money,
        "EVENT" => EntityType::Event,
        _ => EntityType::Other,
    }
}

const REFUSAL_MARKERS: [&str; 14] = [
    "请提供", "请输入", "请说明", "请明确", "不明确", "无法", "不能", "抱歉", "对不起", "需要更多",
    "缺少", "不足", "sorry", "cannot",
];

/// Max chars for a rewrite; longer answers are explanations, not queries.
pub const MAX_REWRITE_CHARS: usize = 50;

/// Whether a model answer is usable as a search query.
pub fn is_valid_rewrite(candidate: &str) -> bool {
    let candidate = candidate.trim();
    if candidate.is_empty() || candidate.chars().count() > MAX_REWRITE_CHARS {
        return false;
    }
    let lower = candidate.to_lowercase();
    if REFUSAL_MARKERS.iter().any(|m| lower.contains(m)) {
        return false;
    }
    !candidate.contains(['。', '?', '？', '!', '！', '\n'])
}
