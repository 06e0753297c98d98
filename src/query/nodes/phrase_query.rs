//! Phrase query - matches an exact sequence of terms

use crate::query::ast::{insert_boost, QueryNode};
use serde_json::{Map, Value};

/// Query that matches documents containing the terms in order
///
/// ```json
/// { "match_phrase": { "name": { "query": "open source", "boost": 2.0 } } }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PhraseQuery {
    /// Field to search in
    pub field: String,
    /// Phrase to match (will be analyzed)
    pub phrase: String,
    /// Number of positions terms may move and still match
    pub slop: Option<u32>,
    /// Boost factor for scoring
    pub boost: Option<f64>,
}

impl PhraseQuery {
    /// Create a new phrase query
    pub fn new(field: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            phrase: phrase.into(),
            slop: None,
            boost: None,
        }
    }

    /// Set the slop
    pub fn with_slop(mut self, slop: u32) -> Self {
        self.slop = Some(slop);
        self
    }

    /// Set the boost factor
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl QueryNode for PhraseQuery {
    fn query_type(&self) -> &'static str {
        "match_phrase"
    }

    fn body(&self) -> Value {
        let mut spec = Map::new();
        spec.insert("query".to_string(), Value::String(self.phrase.clone()));
        if let Some(slop) = self.slop {
            spec.insert("slop".to_string(), Value::from(slop));
        }
        insert_boost(&mut spec, self.boost);

        let mut body = Map::with_capacity(1);
        body.insert(self.field.clone(), Value::Object(spec));
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_phrase_query_dsl() {
        let query = PhraseQuery::new("term_suggest", "open data");
        assert_eq!(query.query_type(), "match_phrase");
        assert_eq!(
            query.to_dsl(),
            json!({ "match_phrase": { "term_suggest": { "query": "open data" } } })
        );
    }

    #[test]
    fn test_phrase_query_with_slop_and_boost() {
        let query = PhraseQuery::new("name", "open data").with_slop(2).with_boost(3.0);
        assert_eq!(
            query.to_dsl(),
            json!({
                "match_phrase": { "name": { "query": "open data", "slop": 2, "boost": 3.0 } }
            })
        );
    }
}
