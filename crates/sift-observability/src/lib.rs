//! # sift-observability
//!
//! Tracing subscriber setup, structured events, span macros, and the
//! counters the pipeline and hybrid executor record into.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{PipelineMetrics, PipelineMetricsSnapshot, RetrievalMetrics, RetrievalMetricsSnapshot, StageStats};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
