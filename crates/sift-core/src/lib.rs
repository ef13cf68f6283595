//! # sift-core
//!
//! Foundation crate for sift.
//! Defines the query context, query DSL, retrieval models, port traits,
//! errors, config, and constants. Every other crate in the workspace
//! depends on this.

pub mod config;
pub mod constants;
pub mod context;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SiftConfig;
pub use context::{Entity, EntityType, Intent, QueryContext};
pub use errors::{SiftError, SiftResult};
pub use models::{RetrievalDecision, RetrievalRequest, SearchMetadata, StructuredQuery};
