//! HTTP adapter for Elasticsearch-compatible `_search` endpoints.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use sift_core::config::SearchEngineConfig;
use sift_core::errors::{SearchError, SiftResult};
use sift_core::models::{EngineRequest, EngineResponse, SearchHit};
use sift_core::traits::ISearchEngine;
use tracing::{debug, warn};

pub struct ElasticsearchEngine {
    client: Option<Client>,
    search_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl ElasticsearchEngine {
    pub fn new(config: &SearchEngineConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .gzip(true)
            .build()
            .map_err(|e| warn!(error = %e, "failed to build search HTTP client"))
            .ok();
        Self {
            client,
            search_url: format!("{}/{}/_search", config.endpoint.trim_end_matches('/'), config.index),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

impl ISearchEngine for ElasticsearchEngine {
    fn search(&self, request: &EngineRequest) -> SiftResult<EngineResponse> {
        let Some(client) = &self.client else {
            return Err(SearchError::RequestFailed {
                reason: "HTTP client unavailable".to_string(),
            }
            .into());
        };

        let mut builder = client.post(&self.search_url).json(&request.to_dsl());
        if let Some(user) = &self.username {
            builder = builder.basic_auth(user, self.password.as_ref());
        }

        let response = builder.send().map_err(|e| SearchError::RequestFailed { reason: e.to_string() })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SearchError::EngineRejected {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body: Value = response
            .json()
            .map_err(|e| SearchError::InvalidResponse { reason: e.to_string() })?;
        let parsed = parse_response(&body)?;
        debug!(hits = parsed.hits.len(), total = parsed.total, "search response parsed");
        Ok(parsed)
    }

    fn name(&self) -> &str {
        "elasticsearch"
    }
}

/// Parse an engine `_search` response body.
pub fn parse_response(body: &Value) -> Result<EngineResponse, SearchError> {
    let hits = body["hits"]["hits"].as_array().ok_or_else(|| SearchError::InvalidResponse {
        reason: "missing hits.hits".to_string(),
    })?;

    let hits = hits
        .iter()
        .map(|hit| {
            let id = hit["_id"].as_str().ok_or_else(|| SearchError::InvalidResponse {
                reason: "hit without _id".to_string(),
            })?;
            Ok(SearchHit {
                id: id.to_string(),
                score: hit["_score"].as_f64().unwrap_or(0.0),
                source: hit.get("_source").cloned().unwrap_or(Value::Null),
            })
        })
        .collect::<Result<Vec<_>, SearchError>>()?;

    // `hits.total` is `{ "value": n }` on 7.x+ and a bare number before.
    let total = body["hits"]["total"]["value"]
        .as_u64()
        .or_else(|| body["hits"]["total"].as_u64())
        .unwrap_or(hits.len() as u64);

    Ok(EngineResponse {
        hits,
        total,
        took_ms: body["took"].as_u64(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_hits_and_total() {
        let body = json!({
            "took": 7,
            "hits": {
                "total": { "value": 42, "relation": "eq" },
                "hits": [
                    { "_id": "a", "_score": 3.5, "_source": { "title": "生活缴费" } },
                    { "_id": "b", "_score": null }
                ]
            }
        });
        let r = parse_response(&body).unwrap();
        assert_eq!(r.total, 42);
        assert_eq!(r.took_ms, Some(7));
        assert_eq!(r.hits[0].source["title"], "生活缴费");
        assert_eq!(r.hits[1].score, 0.0);
    }

    #[test]
    fn legacy_numeric_total() {
        let r = parse_response(&json!({ "hits": { "total": 3, "hits": [] } })).unwrap();
        assert_eq!(r.total, 3);
    }

    #[test]
    fn malformed_body_is_invalid_response() {
        assert!(matches!(
            parse_response(&json!({ "error": "boom" })),
            Err(SearchError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn url_joins_endpoint_and_index() {
        let engine = ElasticsearchEngine::new(&SearchEngineConfig {
            endpoint: "http://es:9200/".into(),
            index: "docs".into(),
            ..SearchEngineConfig::default()
        });
        assert_eq!(engine.search_url(), "http://es:9200/docs/_search");
    }
}
