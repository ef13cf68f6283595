use std::cmp::Reverse;
use std::sync::RwLock;

use sift_core::errors::{SiftError, SiftResult};
use sift_core::models::HotTopic;
use sift_core::traits::IHotTopicStore;

/// Hot-topic store held in memory, replaceable at runtime.
#[derive(Debug, Default)]
pub struct InMemoryHotTopicStore {
    topics: RwLock<Vec<HotTopic>>,
}

impl InMemoryHotTopicStore {
    pub fn new(topics: Vec<HotTopic>) -> Self {
        Self {
            topics: RwLock::new(topics),
        }
    }

    /// Swap in a new topic list.
    pub fn replace(&self, topics: Vec<HotTopic>) -> SiftResult<()> {
        let mut guard = self.topics.write().map_err(|_| SiftError::HotTopicStore {
            reason: "topic lock poisoned".to_string(),
        })?;
        *guard = topics;
        Ok(())
    }
}

impl IHotTopicStore for InMemoryHotTopicStore {
    fn visible_topics(&self) -> SiftResult<Vec<HotTopic>> {
        let guard = self.topics.read().map_err(|_| SiftError::HotTopicStore {
            reason: "topic lock poisoned".to_string(),
        })?;
        let mut visible: Vec<HotTopic> = guard.iter().filter(|t| t.visible).cloned().collect();
        visible.sort_by_key(|t| Reverse(t.popularity));
        Ok(visible)
    }
}
