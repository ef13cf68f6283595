//! HTTP embedding provider for OpenAI-compatible `/v1/embeddings` APIs.
//!
//! Retries with exponential backoff. After retries are exhausted the
//! provider reports unavailable for a cool-down period.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use sift_core::config::EmbeddingConfig;
use sift_core::errors::{EmbeddingError, SiftResult};
use sift_core::traits::IEmbeddingProvider;
use tracing::{debug, warn};

/// How long a failed provider stays marked down.
const COOL_DOWN: Duration = Duration::from_secs(30);

const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// 100ms doubled per retry, capped at [`MAX_BACKOFF`].
fn backoff_delay(attempt: u32) -> Duration {
    let millis = 100u64.saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
    Duration::from_millis(millis).min(MAX_BACKOFF)
}

pub struct ApiProvider {
    client: Option<Client>,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    dimensions: usize,
    max_retries: u32,
    down_since: Mutex<Option<Instant>>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
    encoding_format: &'static str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

impl ApiProvider {
    pub fn new(config: &EmbeddingConfig, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .gzip(true)
            .build()
            .map_err(|e| warn!(error = %e, "failed to build embedding HTTP client"))
            .ok();
        Self {
            client,
            api_key,
            endpoint: config.api_url.clone(),
            model: config.model.clone(),
            dimensions: config.dimensions,
            max_retries: config.max_retries,
            down_since: Mutex::new(None),
        }
    }

    fn request_embeddings(&self, texts: &[String]) -> SiftResult<Vec<Vec<f32>>> {
        if !self.is_available() {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.name().to_string(),
            }
            .into());
        }
        if texts.is_empty() {
            return Err(EmbeddingError::EmptyInput.into());
        }

        let mut last_err = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                std::thread::sleep(backoff_delay(attempt));
                debug!(attempt, "retrying API embedding request");
            }

            match self.send_request(texts) {
                Ok(embeddings) => return Ok(embeddings),
                Err(e) => {
                    warn!(attempt, error = %e, "API embedding request failed");
                    last_err = Some(e);
                }
            }
        }

        self.mark_down();
        Err(last_err.unwrap_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "all retries exhausted".to_string(),
            }
            .into()
        }))
    }

    fn send_request(&self, texts: &[String]) -> SiftResult<Vec<Vec<f32>>> {
        let (Some(client), Some(api_key)) = (&self.client, &self.api_key) else {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.name().to_string(),
            }
            .into());
        };

        let response = client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&EmbedRequest {
                model: &self.model,
                input: texts,
                encoding_format: "float",
            })
            .send()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("HTTP error: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("API returned {status}: {body}"),
            }
            .into());
        }

        let mut resp: EmbedResponse = response.json().map_err(|e| EmbeddingError::InferenceFailed {
            reason: format!("JSON parse error: {e}"),
        })?;
        resp.data.sort_by_key(|d| d.index.unwrap_or(usize::MAX));

        if resp.data.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("expected {} embeddings, got {}", texts.len(), resp.data.len()),
            }
            .into());
        }

        resp.data
            .into_iter()
            .map(|d| {
                if d.embedding.len() != self.dimensions {
                    return Err(EmbeddingError::DimensionMismatch {
                        expected: self.dimensions,
                        actual: d.embedding.len(),
                    }
                    .into());
                }
                Ok(d.embedding)
            })
            .collect()
    }

    fn mark_down(&self) {
        if let Ok(mut guard) = self.down_since.lock() {
            *guard = Some(Instant::now());
        }
    }

    /// Clear a failure mark, e.g. after a successful health check.
    pub fn reset_availability(&self) {
        if let Ok(mut guard) = self.down_since.lock() {
            *guard = None;
        }
    }
}

impl IEmbeddingProvider for ApiProvider {
    fn embed(&self, text: &str) -> SiftResult<Vec<f32>> {
        let results = self.request_embeddings(&[text.to_string()])?;
        results.into_iter().next().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> SiftResult<Vec<Vec<f32>>> {
        self.request_embeddings(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "api"
    }

    fn is_available(&self) -> bool {
        if self.client.is_none() || self.api_key.is_none() {
            return false;
        }
        match self.down_since.lock() {
            Ok(guard) => (*guard).map_or(true, |since| since.elapsed() >= COOL_DOWN),
            Err(_) => false,
        }
    }
}
