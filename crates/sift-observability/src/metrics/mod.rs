//! Counters shared across requests. All recording goes through atomics or
//! short critical sections, so one instance can sit behind an `Arc`.

pub mod pipeline_metrics;
pub mod retrieval_metrics;

pub use pipeline_metrics::{PipelineMetrics, PipelineMetricsSnapshot, StageStats};
pub use retrieval_metrics::{RetrievalMetrics, RetrievalMetricsSnapshot};
