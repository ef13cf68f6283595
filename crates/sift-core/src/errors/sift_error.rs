use super::{CacheError, ConfigError, EmbeddingError, LanguageError, SearchError};

/// Top-level error for the sift workspace.
///
/// Subsystem errors convert into this via `#[from]`, so `?` works across
/// crate boundaries.
#[derive(Debug, thiserror::Error)]
pub enum SiftError {
    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("language service error: {0}")]
    LanguageError(#[from] LanguageError),

    #[error("cache error: {0}")]
    CacheError(#[from] CacheError),

    #[error("search error: {0}")]
    SearchError(#[from] SearchError),

    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("hot topic store error: {reason}")]
    HotTopicStore { reason: String },

    #[error("stage {stage} failed: {reason}")]
    StageFailed { stage: String, reason: String },

    #[error("final query already written with a different value")]
    FinalQueryConflict,

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type SiftResult<T> = Result<T, SiftError>;
