use crate::errors::SiftResult;
use crate::models::HotTopic;

/// Read-only view of trending topics.
pub trait IHotTopicStore: Send + Sync {
    /// Visible topics, most popular first.
    fn visible_topics(&self) -> SiftResult<Vec<HotTopic>>;
}
