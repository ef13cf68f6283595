//! Closed query DSL produced by the understanding pipeline and the hybrid
//! executor. `to_dsl()` renders the search engine's JSON form.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A field reference with an optional boost, rendered `field^boost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBoost {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
}

impl FieldBoost {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            boost: None,
        }
    }

    pub fn boosted(field: impl Into<String>, boost: f32) -> Self {
        Self {
            field: field.into(),
            boost: Some(boost),
        }
    }

    /// Parse `title^2` / `content`. A malformed boost keeps the whole string as the field.
    pub fn parse(spec: &str) -> Self {
        match spec.rsplit_once('^') {
            Some((field, boost)) => match boost.parse::<f32>() {
                Ok(b) => Self::boosted(field, b),
                Err(_) => Self::new(spec),
            },
            None => Self::new(spec),
        }
    }
}

impl fmt::Display for FieldBoost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.boost {
            Some(b) if (b - 1.0).abs() > f32::EPSILON => write!(f, "{}^{}", self.field, b),
            _ => f.write_str(&self.field),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiMatchType {
    #[default]
    BestFields,
    MostFields,
    CrossFields,
}

impl MultiMatchType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::BestFields => "best_fields",
            Self::MostFields => "most_fields",
            Self::CrossFields => "cross_fields",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiMatchQuery {
    pub query: String,
    pub fields: Vec<FieldBoost>,
    #[serde(default)]
    pub match_type: MultiMatchType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzziness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
}

impl MultiMatchQuery {
    pub fn new(query: impl Into<String>, fields: Vec<FieldBoost>) -> Self {
        Self {
            query: query.into(),
            fields,
            match_type: MultiMatchType::BestFields,
            fuzziness: None,
            operator: None,
            boost: None,
        }
    }

    pub fn fuzziness(mut self, fuzziness: impl Into<String>) -> Self {
        self.fuzziness = Some(fuzziness.into());
        self
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchQuery {
    pub field: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoolQuery {
    #[serde(default)]
    pub must: Vec<StructuredQuery>,
    #[serde(default)]
    pub should: Vec<StructuredQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_should_match: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
}

impl BoolQuery {
    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuredQuery {
    MatchAll {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        boost: Option<f32>,
    },
    MultiMatch(MultiMatchQuery),
    Match(MatchQuery),
    Bool(BoolQuery),
}

impl StructuredQuery {
    pub fn match_all() -> Self {
        Self::MatchAll { boost: None }
    }

    pub fn match_field(field: impl Into<String>, query: impl Into<String>, boost: Option<f32>) -> Self {
        Self::Match(MatchQuery {
            field: field.into(),
            query: query.into(),
            boost,
        })
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self, Self::MatchAll { .. })
    }

    /// Set the top-level boost of this query.
    pub fn with_boost(mut self, value: f32) -> Self {
        match &mut self {
            Self::MatchAll { boost } => *boost = Some(value),
            Self::MultiMatch(q) => q.boost = Some(value),
            Self::Match(q) => q.boost = Some(value),
            Self::Bool(q) => q.boost = Some(value),
        }
        self
    }

    /// Number of leaf clauses.
    pub fn clause_count(&self) -> usize {
        match self {
            Self::MatchAll { .. } | Self::MultiMatch(_) | Self::Match(_) => 1,
            Self::Bool(b) => b.must.iter().chain(&b.should).map(Self::clause_count).sum(),
        }
    }

    /// Render the search engine's JSON query DSL.
    pub fn to_dsl(&self) -> Value {
        match self {
            Self::MatchAll { boost } => {
                let mut body = Map::new();
                put_boost(&mut body, *boost);
                json!({ "match_all": body })
            }
            Self::MultiMatch(q) => {
                let mut body = Map::new();
                body.insert("query".into(), Value::String(q.query.clone()));
                body.insert(
                    "fields".into(),
                    Value::Array(q.fields.iter().map(|f| Value::String(f.to_string())).collect()),
                );
                body.insert("type".into(), Value::String(q.match_type.as_str().into()));
                if let Some(fuzz) = &q.fuzziness {
                    body.insert("fuzziness".into(), Value::String(fuzz.clone()));
                }
                if let Some(op) = q.operator {
                    body.insert("operator".into(), Value::String(op.as_str().into()));
                }
                put_boost(&mut body, q.boost);
                json!({ "multi_match": body })
            }
            Self::Match(q) => {
                let mut inner = Map::new();
                inner.insert("query".into(), Value::String(q.query.clone()));
                put_boost(&mut inner, q.boost);
                let mut body = Map::new();
                body.insert(q.field.clone(), Value::Object(inner));
                json!({ "match": body })
            }
            Self::Bool(q) => {
                let mut body = Map::new();
                if !q.must.is_empty() {
                    body.insert("must".into(), Value::Array(q.must.iter().map(Self::to_dsl).collect()));
                }
                if !q.should.is_empty() {
                    body.insert(
                        "should".into(),
                        Value::Array(q.should.iter().map(Self::to_dsl).collect()),
                    );
                }
                if let Some(msm) = q.minimum_should_match {
                    body.insert("minimum_should_match".into(), json!(msm));
                }
                put_boost(&mut body, q.boost);
                json!({ "bool": body })
            }
        }
    }
}

fn put_boost(body: &mut Map<String, Value>, boost: Option<f32>) {
    if let Some(b) = boost {
        body.insert("boost".into(), json!(round_boost(b)));
    }
}

/// f32 boosts rendered at four decimals so `0.7` stays `0.7` on the wire.
pub(crate) fn round_boost(b: f32) -> f64 {
    (f64::from(b) * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_boost_renders_caret_form() {
        assert_eq!(FieldBoost::boosted("title", 3.0).to_string(), "title^3");
        assert_eq!(FieldBoost::boosted("title", 1.5).to_string(), "title^1.5");
        assert_eq!(FieldBoost::new("content").to_string(), "content");
        assert_eq!(FieldBoost::parse("keywords^2"), FieldBoost::boosted("keywords", 2.0));
    }

    #[test]
    fn match_all_renders_empty_object() {
        assert_eq!(StructuredQuery::match_all().to_dsl(), json!({ "match_all": {} }));
    }

    #[test]
    fn bool_omits_empty_clause_lists() {
        let q = StructuredQuery::Bool(BoolQuery {
            should: vec![StructuredQuery::match_field("person", "张三", Some(2.0))],
            minimum_should_match: Some(1),
            ..Default::default()
        });
        let dsl = q.to_dsl();
        assert!(dsl["bool"].get("must").is_none());
        assert_eq!(dsl["bool"]["minimum_should_match"], json!(1));
        assert_eq!(dsl["bool"]["should"][0]["match"]["person"]["query"], "张三");
    }
}
