use sift_core::config::StageSettings;
use sift_core::context::QueryContext;
use sift_core::errors::SiftResult;

/// One step of the understanding pipeline.
///
/// Ordering, enablement and the advisory time budget all come from
/// [`QueryStage::settings`].
pub trait QueryStage: Send + Sync {
    /// Stable identifier, used for timings, metrics and `<name>_error` keys.
    fn name(&self) -> &str;

    fn settings(&self) -> StageSettings;

    /// Whether this stage is skipped for queries marked simple.
    fn skip_for_simple_query(&self) -> bool {
        false
    }

    /// Only the query builder is terminal. Terminal stages run even after
    /// the pipeline budget is spent.
    fn is_terminal(&self) -> bool {
        false
    }

    /// Enrich `ctx`. An `Err` is recorded by the pipeline and execution continues.
    fn process(&self, ctx: &mut QueryContext) -> SiftResult<()>;

    fn should_process(&self, ctx: &QueryContext) -> bool {
        self.settings().enabled && !(ctx.skip_complex_processing() && self.skip_for_simple_query())
    }
}
