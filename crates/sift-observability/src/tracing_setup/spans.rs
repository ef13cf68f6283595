//! Span definitions per operation: pipeline run, stage invocation, search.

/// Span around one understanding pipeline run.
#[macro_export]
macro_rules! pipeline_span {
    ($query:expr) => {
        tracing::info_span!("sift.pipeline", query = %$query)
    };
}

/// Span around one stage invocation.
#[macro_export]
macro_rules! stage_span {
    ($stage:expr, $priority:expr) => {
        tracing::debug_span!("sift.stage", stage = %$stage, priority = $priority)
    };
}

/// Span around one hybrid search.
#[macro_export]
macro_rules! search_span {
    ($query:expr, $mode:expr) => {
        tracing::info_span!("sift.search", query = %$query, mode = ?$mode)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PIPELINE: &str = "sift.pipeline";
    pub const STAGE: &str = "sift.stage";
    pub const SEARCH: &str = "sift.search";
}
