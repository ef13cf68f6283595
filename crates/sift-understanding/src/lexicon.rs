//! Immutable lexicons shared by expansion stages.

use std::collections::BTreeMap;

use sift_core::config::ExpansionConfig;
use sift_core::context::{SynonymCandidate, SynonymSource};

/// Term → synonyms. Keys iterate in sorted order, so fuzzy lookups are
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct SynonymDictionary {
    entries: BTreeMap<String, Vec<String>>,
}

impl SynonymDictionary {
    pub fn new(entries: BTreeMap<String, Vec<String>>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.trim().to_string(), v))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        Self { entries }
    }

    pub fn from_config(config: &ExpansionConfig) -> Self {
        Self::new(config.synonyms.clone())
    }

    /// Exact match first; otherwise every key that contains `token` or is
    /// contained in it.
    pub fn lookup(&self, token: &str) -> Vec<SynonymCandidate> {
        let token = token.trim();
        if token.is_empty() {
            return Vec::new();
        }
        if let Some(exact) = self.entries.get(token) {
            return candidates(exact, SynonymSource::Exact);
        }
        self.entries
            .iter()
            .filter(|(key, _)| token.contains(key.as_str()) || key.contains(token))
            .flat_map(|(_, syns)| candidates(syns, SynonymSource::Fuzzy))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn candidates(terms: &[String], source: SynonymSource) -> Vec<SynonymCandidate> {
    terms
        .iter()
        .filter(|t| !t.trim().is_empty())
        .map(|t| SynonymCandidate {
            term: t.clone(),
            source,
        })
        .collect()
}

/// Fixed candidate set for semantic expansion, deduplicated, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
}

impl Vocabulary {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for t in terms {
            let t = t.into();
            if !t.trim().is_empty() && !out.contains(&t) {
                out.push(t);
            }
        }
        Self { terms: out }
    }

    pub fn from_config(config: &ExpansionConfig) -> Self {
        Self::new(config.vocabulary.iter().cloned())
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
