use serde::{Deserialize, Serialize};

/// How a synonym was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynonymSource {
    Exact,
    Fuzzy,
}

impl SynonymSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymCandidate {
    pub term: String,
    pub source: SynonymSource,
}

/// A related term kept by semantic expansion. `rank` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticCandidate {
    pub term: String,
    pub similarity: f64,
    pub rank: usize,
}

/// Why a hot topic matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchReason {
    Substring,
    Phonetic,
    PhoneticInitial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotTopicMatch {
    pub name: String,
    pub popularity: i64,
    pub match_reason: MatchReason,
}
