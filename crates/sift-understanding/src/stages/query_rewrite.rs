use std::sync::Arc;

use sift_core::config::defaults::{REWRITE_PRIORITY, REWRITE_TIMEOUT_MS};
use sift_core::config::StageSettings;
use sift_core::constants::{META_ORIGINAL_BEFORE_REWRITE, META_REWRITE_APPLIED, STAGE_REWRITE};
use sift_core::context::{Intent, QueryContext};
use sift_core::errors::SiftResult;
use sift_core::traits::ILanguageService;
use tracing::{debug, info};

use crate::stage::QueryStage;

/// Replaces the working query with the language service's rewrite.
///
/// Needs a recognized intent, so it runs after intent and entity stages.
pub struct QueryRewriteStage {
    settings: StageSettings,
    language: Arc<dyn ILanguageService>,
}

impl QueryRewriteStage {
    pub const DEFAULT_SETTINGS: StageSettings = StageSettings::new(REWRITE_PRIORITY, REWRITE_TIMEOUT_MS);

    pub fn new(settings: StageSettings, language: Arc<dyn ILanguageService>) -> Self {
        Self { settings, language }
    }
}

impl QueryStage for QueryRewriteStage {
    fn name(&self) -> &str {
        STAGE_REWRITE
    }

    fn settings(&self) -> StageSettings {
        self.settings
    }

    fn skip_for_simple_query(&self) -> bool {
        true
    }

    fn process(&self, ctx: &mut QueryContext) -> SiftResult<()> {
        if ctx.intent() == Intent::Unknown {
            debug!("no intent recognized, rewrite skipped");
            return Ok(());
        }
        if !self.language.is_service_available() {
            debug!(service = self.language.name(), "language service unavailable, rewrite skipped");
            return Ok(());
        }
        let before = ctx.current_query().to_string();
        let rewritten = self.language.rewrite_query(&before, ctx.intent(), ctx.entities())?;
        let rewritten = rewritten.trim();
        if rewritten != before && ctx.set_current_query(rewritten) {
            info!(from = %before, to = %rewritten, "query rewritten");
            ctx.put_metadata(META_REWRITE_APPLIED, true);
            ctx.put_metadata(META_ORIGINAL_BEFORE_REWRITE, before);
        }
        Ok(())
    }
}
