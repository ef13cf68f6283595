//! Query count, cache hit rate, simple/complex split, per-stage latency and errors.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Per-stage execution statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageStats {
    pub executions: u64,
    pub errors: u64,
    pub over_budget: u64,
    pub total_micros: u64,
    pub max_micros: u64,
}

impl StageStats {
    pub fn average_micros(&self) -> f64 {
        if self.executions == 0 {
            return 0.0;
        }
        self.total_micros as f64 / self.executions as f64
    }
}

#[derive(Debug, Default)]
pub struct PipelineMetrics {
    queries: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    simple_queries: AtomicU64,
    complex_queries: AtomicU64,
    budget_overruns: AtomicU64,
    fallback_queries: AtomicU64,
    stages: Mutex<BTreeMap<String, StageStats>>,
}

/// Point-in-time copy of [`PipelineMetrics`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineMetricsSnapshot {
    pub queries: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub simple_queries: u64,
    pub complex_queries: u64,
    pub budget_overruns: u64,
    pub fallback_queries: u64,
    pub stages: BTreeMap<String, StageStats>,
}

impl PipelineMetricsSnapshot {
    pub fn cache_hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / lookups as f64
    }
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_lookup(&self, hit: bool) {
        let counter = if hit { &self.cache_hits } else { &self.cache_misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_complexity(&self, simple: bool) {
        let counter = if simple {
            &self.simple_queries
        } else {
            &self.complex_queries
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_budget_overrun(&self) {
        self.budget_overruns.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback_query(&self) {
        self.fallback_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stage(&self, stage: &str, elapsed: Duration, failed: bool, over_budget: bool) {
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        let Ok(mut stages) = self.stages.lock() else {
            return;
        };
        let stats = stages.entry(stage.to_string()).or_default();
        stats.executions += 1;
        stats.total_micros = stats.total_micros.saturating_add(micros);
        stats.max_micros = stats.max_micros.max(micros);
        if failed {
            stats.errors += 1;
        }
        if over_budget {
            stats.over_budget += 1;
        }
    }

    pub fn snapshot(&self) -> PipelineMetricsSnapshot {
        let stages = self.stages.lock().map(|s| s.clone()).unwrap_or_default();
        PipelineMetricsSnapshot {
            queries: self.queries.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            simple_queries: self.simple_queries.load(Ordering::Relaxed),
            complex_queries: self.complex_queries.load(Ordering::Relaxed),
            budget_overruns: self.budget_overruns.load(Ordering::Relaxed),
            fallback_queries: self.fallback_queries.load(Ordering::Relaxed),
            stages,
        }
    }

    /// Reset all counters (useful for testing or periodic rotation).
    pub fn reset(&self) {
        for counter in [
            &self.queries,
            &self.cache_hits,
            &self.cache_misses,
            &self.simple_queries,
            &self.complex_queries,
            &self.budget_overruns,
            &self.fallback_queries,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
        if let Ok(mut stages) = self.stages.lock() {
            stages.clear();
        }
    }
}
