//! Fixture loader for sift integration tests.
//!
//! Fixture files live in the workspace-level `test-fixtures/` directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the fixture files.
fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content).unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Synonym dictionary used by the understanding scenarios.
pub fn synonyms() -> BTreeMap<String, Vec<String>> {
    load_fixture("understanding/synonyms.json")
}

/// One expectation for the retrieval strategy selector.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyCase {
    pub name: String,
    pub text: String,
    /// Wire name of the requested mode, e.g. `"AUTO"`.
    pub mode: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default = "enabled_by_default")]
    pub semantic_enabled: bool,
    pub vector_available: bool,
    pub expect_strategy: String,
    pub expect_weight: f64,
    pub expect_reason: bool,
}

fn enabled_by_default() -> bool {
    true
}

pub fn strategy_cases() -> Vec<StrategyCase> {
    load_fixture("retrieval/strategy_cases.json")
}
