use std::sync::Arc;

use sift_core::config::defaults::{INTENT_PRIORITY, INTENT_TIMEOUT_MS};
use sift_core::config::StageSettings;
use sift_core::constants::STAGE_INTENT;
use sift_core::context::{Intent, QueryContext};
use sift_core::errors::SiftResult;
use sift_core::traits::ILanguageService;
use tracing::debug;

use crate::stage::QueryStage;

/// Confidence assigned when recognition fails and the stage falls back to QUERY.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Classifies the query's intent through the language service.
pub struct IntentRecognitionStage {
    settings: StageSettings,
    language: Arc<dyn ILanguageService>,
}

impl IntentRecognitionStage {
    pub const DEFAULT_SETTINGS: StageSettings = StageSettings::new(INTENT_PRIORITY, INTENT_TIMEOUT_MS);

    pub fn new(settings: StageSettings, language: Arc<dyn ILanguageService>) -> Self {
        Self { settings, language }
    }
}

impl QueryStage for IntentRecognitionStage {
    fn name(&self) -> &str {
        STAGE_INTENT
    }

    fn settings(&self) -> StageSettings {
        self.settings
    }

    fn skip_for_simple_query(&self) -> bool {
        true
    }

    fn process(&self, ctx: &mut QueryContext) -> SiftResult<()> {
        if !self.language.is_service_available() {
            debug!(service = self.language.name(), "language service unavailable, intent left unset");
            return Ok(());
        }
        match self.language.recognize_intent(ctx.current_query()) {
            Ok(recognition) => {
                ctx.set_intent(recognition.intent, Some(recognition.confidence));
                Ok(())
            }
            Err(e) => {
                ctx.set_intent(Intent::Query, Some(FALLBACK_CONFIDENCE));
                Err(e)
            }
        }
    }
}
