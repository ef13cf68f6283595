use serde::{Deserialize, Serialize};

use super::Strategy;
use crate::config::defaults;
use crate::errors::ConfigError;

/// Phonetic lexical query shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PinyinMode {
    #[default]
    Auto,
    Strict,
    Fuzzy,
}

/// Requested retrieval composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemanticMode {
    #[default]
    Auto,
    KeywordFirst,
    SemanticFirst,
    Hybrid,
    KeywordOnly,
    SemanticOnly,
}

impl SemanticMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::KeywordFirst => "KEYWORD_FIRST",
            Self::SemanticFirst => "SEMANTIC_FIRST",
            Self::Hybrid => "HYBRID",
            Self::KeywordOnly => "KEYWORD_ONLY",
            Self::SemanticOnly => "SEMANTIC_ONLY",
        }
    }

    /// The strategy this mode asks for when nothing forces a change.
    pub fn literal_strategy(&self) -> Strategy {
        match self {
            Self::Auto | Self::Hybrid => Strategy::Hybrid,
            Self::KeywordFirst | Self::KeywordOnly => Strategy::Keyword,
            Self::SemanticFirst | Self::SemanticOnly => Strategy::Semantic,
        }
    }

    /// Semantic weight used when the request carries none.
    pub fn default_weight(&self) -> f64 {
        match self {
            Self::Auto => defaults::DEFAULT_AUTO_SEMANTIC_WEIGHT,
            Self::KeywordFirst => 0.2,
            Self::SemanticFirst => 0.8,
            Self::Hybrid => 0.5,
            Self::KeywordOnly => 0.0,
            Self::SemanticOnly => 1.0,
        }
    }

    pub fn implies_semantic(&self) -> bool {
        self.literal_strategy() != Strategy::Keyword
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinyinOptions {
    pub enabled: bool,
    pub mode: PinyinMode,
}

impl Default for PinyinOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: PinyinMode::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticOptions {
    pub enabled: bool,
    pub mode: SemanticMode,
    /// Requested semantic share in [0, 1].
    pub weight: Option<f64>,
}

impl Default for SemanticOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: SemanticMode::Auto,
            weight: None,
        }
    }
}

/// One search request as received at the service boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetrievalRequest {
    pub free_text: String,
    /// 1-based page number.
    pub page: usize,
    pub size: usize,
    pub pinyin: PinyinOptions,
    pub semantic: SemanticOptions,
}

impl Default for RetrievalRequest {
    fn default() -> Self {
        Self {
            free_text: String::new(),
            page: 1,
            size: defaults::DEFAULT_PAGE_SIZE,
            pinyin: PinyinOptions::default(),
            semantic: SemanticOptions::default(),
        }
    }
}

impl RetrievalRequest {
    pub fn new(free_text: impl Into<String>) -> Self {
        Self {
            free_text: free_text.into(),
            ..Default::default()
        }
    }

    pub fn with_semantic(mut self, mode: SemanticMode, weight: Option<f64>) -> Self {
        self.semantic.mode = mode;
        self.semantic.weight = weight;
        self
    }

    pub fn with_pinyin(mut self, enabled: bool, mode: PinyinMode) -> Self {
        self.pinyin = PinyinOptions { enabled, mode };
        self
    }

    pub fn with_page(mut self, page: usize, size: usize) -> Self {
        self.page = page;
        self.size = size;
        self
    }

    /// Char count of the trimmed free text.
    pub fn query_length(&self) -> usize {
        self.free_text.trim().chars().count()
    }

    /// Zero-based offset of the first hit.
    pub fn from(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page < 1 {
            return Err(ConfigError::invalid("page", "must be at least 1"));
        }
        if self.size < 1 {
            return Err(ConfigError::invalid("size", "must be at least 1"));
        }
        if let Some(w) = self.semantic.weight {
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(ConfigError::invalid(
                    "semantic.weight",
                    format!("{w} is outside [0, 1]"),
                ));
            }
        }
        Ok(())
    }
}
