use sift_core::config::defaults::{NORMALIZATION_PRIORITY, NORMALIZATION_TIMEOUT_MS};
use sift_core::config::StageSettings;
use sift_core::constants::STAGE_NORMALIZATION;
use sift_core::context::QueryContext;
use sift_core::errors::SiftResult;

use crate::stage::QueryStage;

const IDEOGRAPHIC_SPACE: char = '\u{3000}';
const FULLWIDTH_START: u32 = 0xFF01;
const FULLWIDTH_END: u32 = 0xFF5E;
const FULLWIDTH_OFFSET: u32 = 0xFEE0;

/// Canonicalizes whitespace and full-width characters.
#[derive(Debug, Clone)]
pub struct NormalizationStage {
    settings: StageSettings,
    lowercase: bool,
}

impl NormalizationStage {
    pub const DEFAULT_SETTINGS: StageSettings = StageSettings::new(NORMALIZATION_PRIORITY, NORMALIZATION_TIMEOUT_MS);

    pub fn new(settings: StageSettings, lowercase: bool) -> Self {
        Self { settings, lowercase }
    }
}

impl Default for NormalizationStage {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SETTINGS, false)
    }
}

/// Trim, map U+3000 to a space, fold full-width ASCII (U+FF01..U+FF5E) to
/// half-width, collapse whitespace runs, and optionally lowercase.
pub fn normalize(text: &str, lowercase: bool) -> String {
    let folded: String = text
        .chars()
        .map(|c| match c {
            IDEOGRAPHIC_SPACE => ' ',
            c if (FULLWIDTH_START..=FULLWIDTH_END).contains(&(c as u32)) => {
                char::from_u32(c as u32 - FULLWIDTH_OFFSET).unwrap_or(c)
            }
            c => c,
        })
        .collect();
    let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    if lowercase {
        collapsed.to_lowercase()
    } else {
        collapsed
    }
}

impl QueryStage for NormalizationStage {
    fn name(&self) -> &str {
        STAGE_NORMALIZATION
    }

    fn settings(&self) -> StageSettings {
        self.settings
    }

    fn process(&self, ctx: &mut QueryContext) -> SiftResult<()> {
        let normalized = normalize(ctx.original_query(), self.lowercase);
        ctx.set_current_query(normalized);
        Ok(())
    }
}
