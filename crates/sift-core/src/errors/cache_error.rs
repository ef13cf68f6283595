/// Cache store errors. The gateway logs and swallows these.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("cache value could not be encoded or decoded for {key}: {reason}")]
    Codec { key: String, reason: String },
}
