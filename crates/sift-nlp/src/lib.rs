//! # sift-nlp
//!
//! Implementations of `ILanguageService`:
//! - [`LlmLanguageService`]: OpenAI-compatible chat completions, cached answers
//! - [`RuleBasedLanguageService`]: keyword and regex heuristics, no network

pub mod confidence;
pub mod llm_service;
pub mod parsing;
pub mod prompts;
pub mod rule_based;

pub use llm_service::LlmLanguageService;
pub use rule_based::RuleBasedLanguageService;
