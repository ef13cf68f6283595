/// Search engine errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("search engine returned {status}: {body}")]
    EngineRejected { status: u16, body: String },

    #[error("unparseable search response: {reason}")]
    InvalidResponse { reason: String },
}
