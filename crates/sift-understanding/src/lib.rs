//! # sift-understanding
//!
//! Turns a raw query into an enriched [`QueryContext`] and a structured,
//! weighted query. Stages run sequentially in descending priority; a
//! failing stage is recorded and skipped over, never fatal.
//!
//! [`QueryContext`]: sift_core::QueryContext

pub mod hot_topic_store;
pub mod intent_adjustment;
pub mod lexicon;
pub mod pipeline;
pub mod service;
pub mod stage;
pub mod stages;

pub use hot_topic_store::InMemoryHotTopicStore;
pub use intent_adjustment::{IntentAdjustment, RecordOnlyAdjustment};
pub use lexicon::{SynonymDictionary, Vocabulary};
pub use pipeline::QueryPipeline;
pub use service::{QueryUnderstandingService, UnderstandingPorts};
pub use stage::QueryStage;
