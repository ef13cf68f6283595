pub mod cache;
pub mod embedding;
pub mod hot_topic;
pub mod language;
pub mod search;

pub use cache::ICacheStore;
pub use embedding::{IEmbeddingProvider, IEmbeddingService};
pub use hot_topic::IHotTopicStore;
pub use language::{ILanguageService, IntentRecognition};
pub use search::ISearchEngine;
