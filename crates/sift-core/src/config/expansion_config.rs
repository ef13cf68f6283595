use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// One reading of an ambiguous word. `cues` are query words that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSense {
    pub meaning: String,
    #[serde(default)]
    pub cues: Vec<String>,
}

impl WordSense {
    pub fn new(meaning: &str, cues: &[&str]) -> Self {
        Self {
            meaning: meaning.to_string(),
            cues: cues.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Query enrichment settings and lexicons.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Cap on synonyms contributed per query.
    pub max_synonyms: usize,
    /// Minimum cosine similarity for a related term.
    pub semantic_threshold: f64,
    /// Cap on related terms contributed per query.
    pub max_semantic_terms: usize,
    /// Lowercase ASCII during normalization.
    pub lowercase: bool,
    /// Synonym dictionary: term → synonyms.
    pub synonyms: BTreeMap<String, Vec<String>>,
    /// Fixed candidate vocabulary for semantic expansion.
    pub vocabulary: Vec<String>,
    /// Ambiguous words and their senses, in preference order.
    pub ambiguous_words: BTreeMap<String, Vec<WordSense>>,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            max_synonyms: defaults::DEFAULT_MAX_SYNONYMS,
            semantic_threshold: defaults::DEFAULT_SEMANTIC_THRESHOLD,
            max_semantic_terms: defaults::DEFAULT_MAX_SEMANTIC_TERMS,
            lowercase: defaults::DEFAULT_LOWERCASE_NORMALIZATION,
            synonyms: default_synonyms(),
            vocabulary: default_vocabulary(),
            ambiguous_words: default_ambiguous_words(),
        }
    }
}

fn default_synonyms() -> BTreeMap<String, Vec<String>> {
    let entries: [(&str, &[&str]); 4] = [
        ("生活", &["生活服务", "日常"]),
        ("缴费", &["交费", "支付", "付费"]),
        ("查询", &["搜索", "检索", "查找"]),
        ("办理", &["处理", "操作"]),
    ];
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
        .collect()
}

fn default_vocabulary() -> Vec<String> {
    [
        "生活", "缴费", "查询", "办理", "服务", "交费", "支付", "付费", "搜索", "检索", "查找",
        "处理", "操作", "日常", "生活服务",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_ambiguous_words() -> BTreeMap<String, Vec<WordSense>> {
    BTreeMap::from([
        (
            "苹果".to_string(),
            vec![
                WordSense::new("Apple公司", &["手机", "iPhone", "iOS"]),
                WordSense::new("水果", &["水果", "吃", "新鲜"]),
                WordSense::new("iPhone手机", &[]),
            ],
        ),
        (
            "锁".to_string(),
            vec![
                WordSense::new("门锁", &[]),
                WordSense::new("车锁", &[]),
                WordSense::new("账号锁定", &[]),
            ],
        ),
        (
            "服务".to_string(),
            vec![
                WordSense::new("客户服务", &[]),
                WordSense::new("系统服务", &[]),
                WordSense::new("公共服务", &[]),
            ],
        ),
        (
            "充值".to_string(),
            vec![
                WordSense::new("手机充值", &[]),
                WordSense::new("游戏充值", &[]),
                WordSense::new("账户充值", &[]),
            ],
        ),
    ])
}
