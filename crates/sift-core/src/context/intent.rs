use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What the user is trying to do with a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Query,
    InformationQuery,
    Command,
    Action,
    Question,
    Navigation,
    Comparison,
    Definition,
    List,
    #[default]
    Unknown,
}

impl Intent {
    pub const ALL: [Intent; 10] = [
        Self::Query,
        Self::InformationQuery,
        Self::Command,
        Self::Action,
        Self::Question,
        Self::Navigation,
        Self::Comparison,
        Self::Definition,
        Self::List,
        Self::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "QUERY",
            Self::InformationQuery => "INFORMATION_QUERY",
            Self::Command => "COMMAND",
            Self::Action => "ACTION",
            Self::Question => "QUESTION",
            Self::Navigation => "NAVIGATION",
            Self::Comparison => "COMPARISON",
            Self::Definition => "DEFINITION",
            Self::List => "LIST",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = ();

    /// Case-insensitive; unrecognized labels parse as `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_uppercase();
        Ok(Self::ALL
            .iter()
            .copied()
            .find(|i| i.as_str() == label)
            .unwrap_or(Self::Unknown))
    }
}
