//! Sequential, fault-isolated stage execution.

use std::cmp::Reverse;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use sift_cache::CacheGateway;
use sift_core::config::PipelineConfig;
use sift_core::constants::{META_BUDGET_EXCEEDED, META_CACHE_HIT, META_FALLBACK_QUERY};
use sift_core::context::QueryContext;
use sift_observability::tracing_setup::events;
use sift_observability::{pipeline_span, stage_span, PipelineMetrics};
use tracing::{debug, warn};

use crate::stage::QueryStage;
use crate::stages::query_builder;

/// Owns the ordered stage set and drives one query through it.
pub struct QueryPipeline {
    stages: Vec<Box<dyn QueryStage>>,
    config: PipelineConfig,
    cache: Option<CacheGateway>,
    metrics: Arc<PipelineMetrics>,
}

impl QueryPipeline {
    pub fn new(config: PipelineConfig, cache: Option<CacheGateway>, metrics: Arc<PipelineMetrics>) -> Self {
        Self {
            stages: Vec::new(),
            config,
            cache,
            metrics,
        }
    }

    /// Add a stage. Stages stay sorted by descending priority; equal
    /// priorities keep registration order.
    pub fn register(&mut self, stage: Box<dyn QueryStage>) {
        self.stages.push(stage);
        self.stages.sort_by_key(|s| Reverse(s.settings().priority));
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn metrics(&self) -> &Arc<PipelineMetrics> {
        &self.metrics
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn is_simple(&self, query: &str) -> bool {
        self.config.smart_skip_enabled && query.trim().chars().count() < self.config.simple_query_threshold
    }

    /// Run `query` through every eligible stage. Never fails: stage errors
    /// land in the context's metadata and a final query is always present.
    pub fn execute(&self, query: &str) -> QueryContext {
        let span = pipeline_span!(query);
        let _guard = span.enter();
        self.metrics.record_query();

        let cache = self.cache.as_ref().filter(|_| self.config.cache_enabled);
        if let Some(cache) = cache {
            if let Some(mut cached) = cache.get_context(query) {
                self.metrics.record_cache_lookup(true);
                events::cache_hit("context", query);
                cached.put_metadata(META_CACHE_HIT, true);
                return cached;
            }
            self.metrics.record_cache_lookup(false);
        }

        let mut ctx = QueryContext::new(query);
        let simple = self.is_simple(query);
        ctx.set_skip_complex_processing(simple);
        self.metrics.record_complexity(simple);

        let budget = Duration::from_millis(self.config.budget_ms);
        let started = Instant::now();
        let mut skipped_for_budget: Vec<String> = Vec::new();
        let mut stages_run = 0usize;

        for stage in &self.stages {
            if !stage.should_process(&ctx) {
                debug!(stage = stage.name(), "stage skipped");
                continue;
            }
            let elapsed = started.elapsed();
            if !stage.is_terminal() && elapsed > budget {
                if skipped_for_budget.is_empty() {
                    self.metrics.record_budget_overrun();
                }
                events::pipeline_budget_exceeded(elapsed, budget, stage.name());
                skipped_for_budget.push(stage.name().to_string());
                continue;
            }
            self.run_stage(stage.as_ref(), &mut ctx);
            stages_run += 1;
        }

        if !skipped_for_budget.is_empty() {
            let names: Vec<Value> = skipped_for_budget.into_iter().map(Value::String).collect();
            ctx.put_metadata(META_BUDGET_EXCEEDED, Value::Array(names));
        }

        if ctx.final_query().is_none() {
            let fallback = query_builder::consolidate(&ctx);
            match ctx.set_final_query(fallback) {
                Ok(()) => {
                    ctx.put_metadata(META_FALLBACK_QUERY, true);
                    self.metrics.record_fallback_query();
                }
                Err(e) => warn!(error = %e, "fallback query rejected"),
            }
        }

        if let Some(cache) = cache {
            cache.put_context(query, &ctx);
        }
        events::pipeline_completed(query, stages_run, ctx.total_stage_time(), started.elapsed());
        ctx
    }

    fn run_stage(&self, stage: &dyn QueryStage, ctx: &mut QueryContext) {
        let settings = stage.settings();
        let name = stage.name();
        let span = stage_span!(name, settings.priority);
        let _guard = span.enter();

        let started = Instant::now();
        let result = stage.process(ctx);
        let elapsed = started.elapsed();
        ctx.record_stage_timing(name, elapsed);

        let budget = settings.timeout_budget();
        let over_budget = elapsed > budget;
        if over_budget {
            events::stage_over_budget(name, elapsed, budget);
        }

        let failed = match result {
            Ok(()) => false,
            Err(e) => {
                let message = e.to_string();
                events::stage_failed(name, &message);
                ctx.record_stage_error(name, message);
                true
            }
        };
        self.metrics.record_stage(name, elapsed, failed, over_budget);
    }
}
