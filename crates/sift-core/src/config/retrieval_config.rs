use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid retrieval configuration: field lists, phonetic boosts, kNN shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Semantic weight used when AUTO is requested without an explicit weight
    /// and the length tiering is disabled.
    pub default_semantic_weight: f64,
    /// Use the length-tiered weight for AUTO requests without a weight.
    pub length_tiered_auto_weight: bool,
    /// Trimmed queries at or below this many chars are "short".
    pub short_query_max_chars: usize,
    /// Plain searchable fields, `field` or `field^boost`.
    pub searchable_fields: Vec<String>,
    /// Phonetic transliteration fields.
    pub pinyin_fields: Vec<String>,
    /// Phonetic initial-letter fields.
    pub first_letter_fields: Vec<String>,
    pub vector_field: String,
    pub knn_k: usize,
    pub knn_num_candidates: usize,
    /// Merge the understanding pipeline's final query into the lexical clause.
    pub use_understanding: bool,
    pub phonetic: PhoneticBoosts,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_semantic_weight: defaults::DEFAULT_AUTO_SEMANTIC_WEIGHT,
            length_tiered_auto_weight: true,
            short_query_max_chars: defaults::DEFAULT_SHORT_QUERY_MAX_CHARS,
            searchable_fields: strings(&[
                "title^2",
                "content",
                "description",
                "name",
                "text",
                "category",
            ]),
            pinyin_fields: strings(&[
                "title.pinyin^2",
                "content.pinyin",
                "description.pinyin",
                "name.pinyin",
            ]),
            first_letter_fields: strings(&[
                "title.first_letter",
                "content.first_letter",
                "name.first_letter",
            ]),
            vector_field: defaults::DEFAULT_VECTOR_FIELD.to_string(),
            knn_k: defaults::DEFAULT_KNN_K,
            knn_num_candidates: defaults::DEFAULT_KNN_NUM_CANDIDATES,
            use_understanding: false,
            phonetic: PhoneticBoosts::default(),
        }
    }
}

/// Clause boosts per phonetic mode: `[fields, pinyin, first_letter]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneticBoosts {
    pub auto: [f32; 3],
    pub strict: [f32; 3],
    pub fuzzy: [f32; 3],
}

impl Default for PhoneticBoosts {
    fn default() -> Self {
        Self {
            auto: [2.0, 1.5, 1.0],
            strict: [3.0, 1.0, 0.5],
            fuzzy: [1.5, 2.0, 1.5],
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
