//! Match query - full-text search with analysis

use crate::query::ast::{insert_boost, QueryNode};
use crate::query::types::MatchOperator;
use serde_json::{Map, Value};

/// Query that performs full-text search on a field
///
/// The engine analyzes the text and matches the resulting terms using the
/// operator. Without options the compact `{ "field": "text" }` form is emitted.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchQuery {
    /// Field to search in
    pub field: String,
    /// Text to search for (will be analyzed)
    pub text: String,
    /// How to combine terms (AND/OR); engine default when unset
    pub operator: Option<MatchOperator>,
    /// Boost factor for scoring
    pub boost: Option<f64>,
}

impl MatchQuery {
    /// Create a new match query
    pub fn new(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            text: text.into(),
            operator: None,
            boost: None,
        }
    }

    /// Set the operator to AND (all terms must match)
    pub fn with_and_operator(mut self) -> Self {
        self.operator = Some(MatchOperator::And);
        self
    }

    /// Set the boost factor
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    fn is_compact(&self) -> bool {
        self.operator.is_none() && self.boost.is_none()
    }
}

impl QueryNode for MatchQuery {
    fn query_type(&self) -> &'static str {
        "match"
    }

    fn body(&self) -> Value {
        let spec = if self.is_compact() {
            Value::String(self.text.clone())
        } else {
            let mut spec = Map::new();
            spec.insert("query".to_string(), Value::String(self.text.clone()));
            if let Some(operator) = self.operator {
                spec.insert("operator".to_string(), Value::from(operator.as_str()));
            }
            insert_boost(&mut spec, self.boost);
            Value::Object(spec)
        };

        let mut body = Map::with_capacity(1);
        body.insert(self.field.clone(), spec);
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_query_creation() {
        let query = MatchQuery::new("description", "open data");
        assert_eq!(query.field, "description");
        assert_eq!(query.text, "open data");
        assert_eq!(query.operator, None);
        assert!(query.is_scoring());
    }

    #[test]
    fn test_match_query_compact_dsl() {
        let query = MatchQuery::new("term_suggest", "api");
        assert_eq!(query.to_dsl(), json!({ "match": { "term_suggest": "api" } }));
    }

    #[test]
    fn test_match_query_with_options() {
        let query = MatchQuery::new("description", "open data")
            .with_and_operator()
            .with_boost(1.5);
        assert_eq!(
            query.to_dsl(),
            json!({
                "match": {
                    "description": { "query": "open data", "operator": "and", "boost": 1.5 }
                }
            })
        );
    }
}
