use serde::{Deserialize, Serialize};

use super::defaults;

/// Pipeline orchestration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Trimmed queries shorter than this many chars are "simple".
    pub simple_query_threshold: usize,
    /// Skip complex stages for simple queries.
    pub smart_skip_enabled: bool,
    /// Advisory whole-pipeline budget. Once exceeded, remaining
    /// enrichment stages are skipped; the terminal stage still runs.
    pub budget_ms: u64,
    /// Cache full understanding results.
    pub cache_enabled: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            simple_query_threshold: defaults::DEFAULT_SIMPLE_QUERY_THRESHOLD,
            smart_skip_enabled: defaults::DEFAULT_SMART_SKIP_ENABLED,
            budget_ms: defaults::DEFAULT_PIPELINE_BUDGET_MS,
            cache_enabled: defaults::DEFAULT_CONTEXT_CACHE_ENABLED,
        }
    }
}
