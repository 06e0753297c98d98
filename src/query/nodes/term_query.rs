//! Term query - exact match on a field

use crate::query::ast::{insert_boost, QueryNode};
use serde_json::{Map, Value};

/// Query that matches documents containing an exact term in a field
///
/// The value is sent verbatim; callers normalize casing before building it.
#[derive(Clone, Debug, PartialEq)]
pub struct TermQuery {
    /// Field to search in
    pub field: String,
    /// Exact term to match
    pub value: String,
    /// Boost factor for scoring
    pub boost: Option<f64>,
}

impl TermQuery {
    /// Create a new term query
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            boost: None,
        }
    }

    /// Set the boost factor
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl QueryNode for TermQuery {
    fn query_type(&self) -> &'static str {
        "term"
    }

    fn body(&self) -> Value {
        let spec = match self.boost {
            None => Value::String(self.value.clone()),
            Some(_) => {
                let mut spec = Map::new();
                spec.insert("value".to_string(), Value::String(self.value.clone()));
                insert_boost(&mut spec, self.boost);
                Value::Object(spec)
            }
        };

        let mut body = Map::with_capacity(1);
        body.insert(self.field.clone(), spec);
        Value::Object(body)
    }

    fn is_scoring(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_term_query_creation() {
        let query = TermQuery::new("agency.acronym", "gsa");
        assert_eq!(query.field, "agency.acronym");
        assert_eq!(query.value, "gsa");
        assert_eq!(query.query_type(), "term");
        assert!(!query.is_scoring());
    }

    #[test]
    fn test_term_query_dsl() {
        let query = TermQuery::new("status.keyword", "production");
        assert_eq!(
            query.to_dsl(),
            json!({ "term": { "status.keyword": "production" } })
        );
    }

    #[test]
    fn test_term_query_with_boost() {
        let query = TermQuery::new("status", "production").with_boost(2.0);
        assert_eq!(
            query.to_dsl(),
            json!({ "term": { "status": { "value": "production", "boost": 2.0 } } })
        );
    }
}
