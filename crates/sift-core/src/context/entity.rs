use serde::{Deserialize, Serialize};

/// Entity categories recognized in queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Person,
    Location,
    Organization,
    DateTime,
    Product,
    Money,
    Event,
    #[serde(other)]
    Other,
}

impl EntityType {
    /// Document field an entity of this type is matched against, if any.
    pub fn search_field(&self) -> Option<&'static str> {
        match self {
            Self::Person => Some("person"),
            Self::Location => Some("location"),
            Self::Organization => Some("organization"),
            Self::DateTime => Some("date"),
            Self::Product => Some("product"),
            Self::Money => Some("amount"),
            Self::Event | Self::Other => None,
        }
    }
}

/// A recognized entity span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Char offset in the query, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl Entity {
    pub fn new(text: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            text: text.into(),
            entity_type,
            position: None,
        }
    }

    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}
