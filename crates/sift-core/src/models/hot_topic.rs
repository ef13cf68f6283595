use serde::{Deserialize, Serialize};

/// A trending topic as held by the hot-topic store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotTopic {
    pub name: String,
    pub popularity: i64,
    /// Full phonetic transliteration, e.g. "shenghuofuwu".
    #[serde(default)]
    pub phonetic: String,
    /// Initial letters of the transliteration, e.g. "shfw".
    #[serde(default)]
    pub phonetic_initial: String,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl HotTopic {
    pub fn new(name: impl Into<String>, popularity: i64) -> Self {
        Self {
            name: name.into(),
            popularity,
            phonetic: String::new(),
            phonetic_initial: String::new(),
            visible: true,
        }
    }

    pub fn with_phonetic(mut self, phonetic: impl Into<String>, initial: impl Into<String>) -> Self {
        self.phonetic = phonetic.into();
        self.phonetic_initial = initial.into();
        self
    }
}
