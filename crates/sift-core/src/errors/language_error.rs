/// Intent / entity / rewrite service errors.
#[derive(Debug, thiserror::Error)]
pub enum LanguageError {
    #[error("language service unavailable: {service}")]
    ServiceUnavailable { service: String },

    #[error("language request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("unparseable language response: {reason}")]
    InvalidResponse { reason: String },
}
