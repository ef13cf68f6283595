use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::SemanticMode;

/// Effective retrieval composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Keyword,
    Semantic,
    Hybrid,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Semantic => "semantic",
            Self::Hybrid => "hybrid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorServiceStatus {
    Available,
    Unavailable,
}

impl VectorServiceStatus {
    pub fn from_available(available: bool) -> Self {
        if available {
            Self::Available
        } else {
            Self::Unavailable
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTimings {
    pub total: Duration,
    pub query_build: Duration,
    pub vector_generation: Duration,
}

/// Outcome of strategy selection for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalDecision {
    pub requested_mode: SemanticMode,
    pub actual_strategy: Strategy,
    pub keyword_enabled: bool,
    pub semantic_enabled: bool,
    /// Vector share in [0, 1]; lexical share is `1 - semantic_weight`.
    pub semantic_weight: f64,
    pub vector_service_status: VectorServiceStatus,
    pub adjustment_reason: Option<String>,
    pub query_length: usize,
    #[serde(default)]
    pub timings: DecisionTimings,
}

impl RetrievalDecision {
    /// Fall back to lexical-only retrieval.
    pub fn degrade_to_keyword(&mut self, reason: impl Into<String>) {
        self.actual_strategy = Strategy::Keyword;
        self.keyword_enabled = true;
        self.semantic_enabled = false;
        self.adjustment_reason = Some(reason.into());
    }

    pub fn diverges_from_request(&self) -> bool {
        self.actual_strategy != self.requested_mode.literal_strategy()
    }
}
