//! Chat-completion backed language service.
//!
//! Answers are cached per query through the cache gateway (LLM slot, 1 h).
//! Transport and parse failures surface as `LanguageError`; the calling
//! stage records them and the pipeline moves on.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use sift_cache::CacheGateway;
use sift_core::config::LlmConfig;
use sift_core::context::{Entity, Intent};
use sift_core::errors::{LanguageError, SiftResult};
use sift_core::traits::{ILanguageService, IntentRecognition};
use tracing::{debug, info, warn};

use crate::confidence::intent_confidence;
use crate::parsing;
use crate::prompts;

/// Environment variable consulted when `llm.api_key` is unset.
pub const API_KEY_ENV: &str = "SIFT_LLM_API_KEY";

pub struct LlmLanguageService {
    client: Option<Client>,
    api_key: Option<String>,
    config: LlmConfig,
    cache: Option<CacheGateway>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

impl LlmLanguageService {
    pub fn new(config: LlmConfig, cache: Option<CacheGateway>) -> Self {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()));
        let client = if config.enabled {
            Client::builder()
                .timeout(Duration::from_millis(config.timeout_ms))
                .gzip(true)
                .build()
                .map_err(|e| warn!(error = %e, "failed to build LLM HTTP client"))
                .ok()
        } else {
            None
        };
        info!(
            enabled = config.enabled,
            model = %config.model,
            has_key = api_key.is_some(),
            "LLM language service initialized"
        );
        Self {
            client,
            api_key,
            config,
            cache,
        }
    }

    fn complete(&self, prompt: &str) -> SiftResult<String> {
        let (Some(client), Some(api_key)) = (&self.client, &self.api_key) else {
            return Err(LanguageError::ServiceUnavailable {
                service: "llm".to_string(),
            }
            .into());
        };

        let response = client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&ChatRequest {
                model: &self.config.model,
                messages: [ChatMessage {
                    role: "user",
                    content: prompt,
                }],
                temperature: self.config.temperature,
                max_tokens: self.config.max_tokens,
            })
            .send()
            .map_err(|e| LanguageError::RequestFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LanguageError::RequestFailed {
                reason: format!("API returned {status}: {body}"),
            }
            .into());
        }

        let parsed: ChatResponse = response.json().map_err(|e| LanguageError::InvalidResponse {
            reason: e.to_string(),
        })?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .map(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                LanguageError::InvalidResponse {
                    reason: "empty completion".to_string(),
                }
                .into()
            })
    }
}

impl ILanguageService for LlmLanguageService {
    fn recognize_intent(&self, query: &str) -> SiftResult<IntentRecognition> {
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get_intent(query)) {
            debug!(query, intent = %hit.intent, "intent from cache");
            return Ok(hit);
        }

        let answer = self.complete(&prompts::render(prompts::INTENT_PROMPT, &[("query", query)]))?;
        let intent = parsing::parse_intent(&answer).ok_or_else(|| LanguageError::InvalidResponse {
            reason: format!("unrecognized intent label: {}", answer.trim()),
        })?;
        let recognition = IntentRecognition {
            intent,
            confidence: intent_confidence(intent, query),
        };
        if let Some(cache) = &self.cache {
            cache.put_intent(query, &recognition);
        }
        Ok(recognition)
    }

    fn extract_entities(&self, query: &str) -> SiftResult<Vec<Entity>> {
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get_entities(query)) {
            debug!(query, count = hit.len(), "entities from cache");
            return Ok(hit);
        }

        let answer = self.complete(&prompts::render(prompts::ENTITY_PROMPT, &[("query", query)]))?;
        let entities = parsing::parse_entities(&answer).map_err(|e| LanguageError::InvalidResponse {
            reason: format!("entity list: {e}"),
        })?;
        if let Some(cache) = &self.cache {
            cache.put_entities(query, &entities);
        }
        Ok(entities)
    }

    fn rewrite_query(&self, query: &str, intent: Intent, entities: &[Entity]) -> SiftResult<String> {
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get_rewrite(query, intent)) {
            return Ok(hit);
        }

        let entity_list = if entities.is_empty() {
            "无".to_string()
        } else {
            entities
                .iter()
                .map(|e| format!("{}({:?})", e.text, e.entity_type))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let prompt = prompts::render(
            prompts::REWRITE_PROMPT,
            &[("query", query), ("intent", intent.as_str()), ("entities", &entity_list)],
        );
        let answer = self.complete(&prompt)?;
        let candidate = answer.trim();
        if !parsing::is_valid_rewrite(candidate) {
            debug!(query, answer = candidate, "rejected rewrite, keeping query");
            return Ok(query.to_string());
        }
        if let Some(cache) = &self.cache {
            cache.put_rewrite(query, intent, candidate);
        }
        Ok(candidate.to_string())
    }

    fn name(&self) -> &str {
        "llm"
    }

    fn is_service_available(&self) -> bool {
        self.config.enabled && self.client.is_some() && self.api_key.is_some()
    }
}
