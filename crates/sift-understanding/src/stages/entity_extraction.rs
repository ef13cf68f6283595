use std::sync::Arc;

use sift_core::config::defaults::{ENTITY_PRIORITY, ENTITY_TIMEOUT_MS};
use sift_core::config::StageSettings;
use sift_core::constants::STAGE_ENTITY;
use sift_core::context::QueryContext;
use sift_core::errors::SiftResult;
use sift_core::traits::ILanguageService;
use tracing::debug;

use crate::stage::QueryStage;

/// Extracts typed entities through the language service.
pub struct EntityExtractionStage {
    settings: StageSettings,
    language: Arc<dyn ILanguageService>,
}

impl EntityExtractionStage {
    pub const DEFAULT_SETTINGS: StageSettings = StageSettings::new(ENTITY_PRIORITY, ENTITY_TIMEOUT_MS);

    pub fn new(settings: StageSettings, language: Arc<dyn ILanguageService>) -> Self {
        Self { settings, language }
    }
}

impl QueryStage for EntityExtractionStage {
    fn name(&self) -> &str {
        STAGE_ENTITY
    }

    fn settings(&self) -> StageSettings {
        self.settings
    }

    fn skip_for_simple_query(&self) -> bool {
        true
    }

    fn process(&self, ctx: &mut QueryContext) -> SiftResult<()> {
        if !self.language.is_service_available() {
            debug!(service = self.language.name(), "language service unavailable, entities skipped");
            return Ok(());
        }
        let entities = self.language.extract_entities(ctx.current_query())?;
        for entity in entities {
            ctx.add_entity(entity);
        }
        Ok(())
    }
}
