//! # sift-retrieval
//!
//! Decides how a search request is composed (keyword, semantic, hybrid),
//! builds the lexical and vector parts, and executes them against the
//! search engine with graceful degradation to keyword search.

pub mod elasticsearch;
pub mod executor;
pub mod lexical;
pub mod service;
pub mod strategy;

pub use elasticsearch::ElasticsearchEngine;
pub use executor::{HybridQueryExecutor, SearchFailure, SearchOutcome};
pub use service::HybridSearchService;
pub use strategy::decide_retrieval_strategy;
