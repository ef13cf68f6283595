//! Structured log events for key operations.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

use std::time::Duration;

/// A stage returned an error; the pipeline continues.
pub fn stage_failed(stage: &str, error: &str) {
    tracing::warn!(event = "stage_failed", stage = %stage, error = %error, "stage failed");
}

/// A stage ran longer than its advisory budget.
pub fn stage_over_budget(stage: &str, elapsed: Duration, budget: Duration) {
    tracing::warn!(
        event = "stage_over_budget",
        stage = %stage,
        elapsed_ms = elapsed.as_millis() as u64,
        budget_ms = budget.as_millis() as u64,
        "stage exceeded its time budget"
    );
}

/// The whole pipeline ran past its budget; remaining enrichment is skipped.
pub fn pipeline_budget_exceeded(elapsed: Duration, budget: Duration, skipped_stage: &str) {
    tracing::warn!(
        event = "pipeline_budget_exceeded",
        elapsed_ms = elapsed.as_millis() as u64,
        budget_ms = budget.as_millis() as u64,
        skipped_stage = %skipped_stage,
        "pipeline budget exceeded, skipping stage"
    );
}

/// An optional signal source failed and a fallback was used.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// The retrieval strategy selector produced a decision.
pub fn strategy_decided(requested: &str, actual: &str, semantic_weight: f64, reason: Option<&str>) {
    tracing::info!(
        event = "strategy_decided",
        requested = %requested,
        actual = %actual,
        semantic_weight = semantic_weight,
        reason = reason.unwrap_or(""),
        "retrieval strategy decided"
    );
}

/// A cached result was served.
pub fn cache_hit(slot: &str, query: &str) {
    tracing::debug!(event = "cache_hit", slot = %slot, query = %query, "cache hit");
}

/// An understanding pipeline run finished.
/// `stage_time` sums the per-stage timings; `elapsed` is wall time including cache and fallback work.
pub fn pipeline_completed(query: &str, stages_run: usize, stage_time: Duration, elapsed: Duration) {
    tracing::info!(
        event = "pipeline_completed",
        query = %query,
        stages_run = stages_run,
        stage_ms = stage_time.as_millis() as u64,
        elapsed_ms = elapsed.as_millis() as u64,
        "query understanding completed"
    );
}
