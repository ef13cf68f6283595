use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::structured_query::{round_boost, StructuredQuery};

/// Approximate nearest-neighbour clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnnClause {
    pub field: String,
    pub query_vector: Vec<f32>,
    pub k: usize,
    pub num_candidates: usize,
    pub boost: f32,
}

/// Everything the search engine needs for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineRequest {
    /// Lexical part. `None` for vector-only requests.
    pub query: Option<StructuredQuery>,
    pub knn: Option<KnnClause>,
    pub from: usize,
    pub size: usize,
}

impl EngineRequest {
    pub fn to_dsl(&self) -> Value {
        let mut body = Map::new();
        body.insert("from".into(), json!(self.from));
        body.insert("size".into(), json!(self.size));
        if let Some(query) = &self.query {
            body.insert("query".into(), query.to_dsl());
        }
        if let Some(knn) = &self.knn {
            body.insert(
                "knn".into(),
                json!({
                    "field": knn.field,
                    "query_vector": knn.query_vector,
                    "k": knn.k,
                    "num_candidates": knn.num_candidates,
                    "boost": round_boost(knn.boost),
                }),
            );
        }
        if self.query.is_none() && self.knn.is_none() {
            body.insert("query".into(), StructuredQuery::match_all().to_dsl());
        }
        Value::Object(body)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub score: f64,
    #[serde(default)]
    pub source: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineResponse {
    pub hits: Vec<SearchHit>,
    pub total: u64,
    #[serde(default)]
    pub took_ms: Option<u64>,
}
