mod cache_error;
mod config_error;
mod embedding_error;
mod language_error;
mod search_error;
mod sift_error;

pub use cache_error::CacheError;
pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use language_error::LanguageError;
pub use search_error::SearchError;
pub use sift_error::{SiftError, SiftResult};
