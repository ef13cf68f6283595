//! Strategy mix, degradations, and engine failures of the hybrid executor.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use sift_core::models::Strategy;

#[derive(Debug, Default)]
pub struct RetrievalMetrics {
    keyword: AtomicU64,
    semantic: AtomicU64,
    hybrid: AtomicU64,
    degraded: AtomicU64,
    vector_failures: AtomicU64,
    engine_failures: AtomicU64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalMetricsSnapshot {
    pub keyword: u64,
    pub semantic: u64,
    pub hybrid: u64,
    /// Searches whose strategy diverged from the requested mode.
    pub degraded: u64,
    pub vector_failures: u64,
    pub engine_failures: u64,
}

impl RetrievalMetricsSnapshot {
    pub fn total(&self) -> u64 {
        self.keyword + self.semantic + self.hybrid
    }
}

impl RetrievalMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_strategy(&self, strategy: Strategy, degraded: bool) {
        let counter = match strategy {
            Strategy::Keyword => &self.keyword,
            Strategy::Semantic => &self.semantic,
            Strategy::Hybrid => &self.hybrid,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        if degraded {
            self.degraded.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_vector_failure(&self) {
        self.vector_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_engine_failure(&self) {
        self.engine_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> RetrievalMetricsSnapshot {
        RetrievalMetricsSnapshot {
            keyword: self.keyword.load(Ordering::Relaxed),
            semantic: self.semantic.load(Ordering::Relaxed),
            hybrid: self.hybrid.load(Ordering::Relaxed),
            degraded: self.degraded.load(Ordering::Relaxed),
            vector_failures: self.vector_failures.load(Ordering::Relaxed),
            engine_failures: self.engine_failures.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_mix() {
        let m = RetrievalMetrics::new();
        m.record_strategy(Strategy::Hybrid, false);
        m.record_strategy(Strategy::Keyword, true);
        let s = m.snapshot();
        assert_eq!(s.total(), 2);
        assert_eq!(s.degraded, 1);
    }
}
