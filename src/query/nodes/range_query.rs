//! Range query - matches documents with field values in a range

use crate::query::ast::QueryNode;
use crate::query::types::{RangeBounds, RangeValue};
use serde_json::{Map, Value};

/// Query that matches documents with field values within a specified range
///
/// Works with numeric fields and date fields; dates are passed as formatted
/// strings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RangeQuery {
    /// Field to search in
    pub field: String,
    /// Range bounds (gte, gt, lte, lt)
    pub bounds: RangeBounds,
}

impl RangeQuery {
    /// Create a new range query
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            bounds: RangeBounds::default(),
        }
    }

    /// Set the greater-than-or-equal bound
    pub fn gte(mut self, value: impl Into<RangeValue>) -> Self {
        self.bounds.gte = Some(value.into());
        self
    }

    /// Set the greater-than bound
    pub fn gt(mut self, value: impl Into<RangeValue>) -> Self {
        self.bounds.gt = Some(value.into());
        self
    }

    /// Set the less-than-or-equal bound
    pub fn lte(mut self, value: impl Into<RangeValue>) -> Self {
        self.bounds.lte = Some(value.into());
        self
    }

    /// Set the less-than bound
    pub fn lt(mut self, value: impl Into<RangeValue>) -> Self {
        self.bounds.lt = Some(value.into());
        self
    }
}

impl QueryNode for RangeQuery {
    fn query_type(&self) -> &'static str {
        "range"
    }

    fn body(&self) -> Value {
        let bounds =
            serde_json::to_value(&self.bounds).unwrap_or_else(|_| Value::Object(Map::new()));
        let mut body = Map::with_capacity(1);
        body.insert(self.field.clone(), bounds);
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
    fn test_range_query_creation() {
        let query = RangeQuery::new("date.created").gte("2017-01-01");
        assert_eq!(query.field, "date.created");
        assert!(query.bounds.gte.is_some());
        assert!(query.bounds.lte.is_none());
        assert_eq!(query.query_type(), "range");
        assert!(!query.is_scoring());
    }

    #[test]
    fn test_range_query_dsl() {
        let query = RangeQuery::new("date.lastModified")
            .gte("2016-01-01")
            .lte("2016-12-31");
        assert_eq!(
            query.to_dsl(),
            json!({
                "range": { "date.lastModified": { "gte": "2016-01-01", "lte": "2016-12-31" } }
            })
        );
    }

    #[test]
    fn test_range_query_numeric() {
        let query = RangeQuery::new("score").gt(5_i64).lt(10_i64);
        assert_eq!(
            query.to_dsl(),
            json!({ "range": { "score": { "gt": 5, "lt": 10 } } })
        );
    }
}
