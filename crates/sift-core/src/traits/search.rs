use crate::errors::SiftResult;
use crate::models::{EngineRequest, EngineResponse};

/// Full-text / vector search engine.
pub trait ISearchEngine: Send + Sync {
    fn search(&self, request: &EngineRequest) -> SiftResult<EngineResponse>;

    fn name(&self) -> &str;
}
