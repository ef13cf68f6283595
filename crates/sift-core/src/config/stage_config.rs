use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Resolved execution settings for one stage.
///
/// This is the only place a stage's ordering comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSettings {
    pub enabled: bool,
    pub priority: i32,
    pub timeout_ms: u64,
}

impl StageSettings {
    pub const fn new(priority: i32, timeout_ms: u64) -> Self {
        Self {
            enabled: true,
            priority,
            timeout_ms,
        }
    }

    /// Advisory time budget. Overruns are logged, never cancelled.
    pub fn timeout_budget(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Partial per-stage override as written in TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageOverride {
    pub enabled: Option<bool>,
    pub priority: Option<i32>,
    pub timeout_ms: Option<u64>,
}

/// Per-stage overrides keyed by stage name.
///
/// ```toml
/// [stages.semantic_expansion]
/// enabled = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StagesConfig {
    overrides: BTreeMap<String, StageOverride>,
}

impl StagesConfig {
    /// Apply any override for `stage` on top of the stage's built-in defaults.
    pub fn resolve(&self, stage: &str, defaults: StageSettings) -> StageSettings {
        match self.overrides.get(stage) {
            Some(o) => StageSettings {
                enabled: o.enabled.unwrap_or(defaults.enabled),
                priority: o.priority.unwrap_or(defaults.priority),
                timeout_ms: o.timeout_ms.unwrap_or(defaults.timeout_ms),
            },
            None => defaults,
        }
    }

    pub fn set(&mut self, stage: impl Into<String>, value: StageOverride) {
        self.overrides.insert(stage.into(), value);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.overrides.keys().map(String::as_str)
    }
}
