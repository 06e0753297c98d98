//! Boolean query - combines multiple clauses with AND, OR, NOT semantics

use crate::query::ast::{insert_boost, Clause, QueryNode};
use crate::query::types::MinimumShouldMatch;
use serde_json::{Map, Value};

/// Boolean query combining multiple clauses
///
/// The boolean query supports four types of clauses:
/// - `must`: All clauses must match (AND). Contributes to score.
/// - `should`: At least one clause should match (OR). Contributes to score.
/// - `must_not`: No clause must match (NOT). Does not contribute to score.
/// - `filter`: All clauses must match (AND). Does not contribute to score.
///
/// Empty clause lists are left out of the rendered query.
///
/// # Example
///
/// ```json
/// {
///   "bool": {
///     "must": [
///       { "multi_match": { "query": "open data", "fields": ["name^5"] } }
///     ],
///     "filter": [
///       { "term": { "agency.acronym": "gsa" } },
///       { "range": { "date.created": { "gte": "2017-01-01" } } }
///     ]
///   }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoolQuery {
    /// Clauses that must match (AND, scoring)
    pub must: Vec<Clause>,
    /// Clauses where at least one should match (OR, scoring)
    pub should: Vec<Clause>,
    /// Clauses that must not match (NOT, no scoring)
    pub must_not: Vec<Clause>,
    /// Clauses that must match (AND, no scoring)
    pub filter: Vec<Clause>,
    /// Minimum number of should clauses that must match
    pub minimum_should_match: Option<MinimumShouldMatch>,
    /// Boost factor for scoring
    pub boost: Option<f64>,
}

impl BoolQuery {
    /// Create a new empty boolean query
    pub fn new() -> Self {
        Self::default()
    }

    /// A should-only query requiring at least one of the clauses
    ///
    /// This is the disjunction used for "any of these values" filters.
    pub fn any_of(clauses: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            should: clauses.into_iter().collect(),
            minimum_should_match: Some(MinimumShouldMatch::Count(1)),
            ..Default::default()
        }
    }

    /// Add a must clause
    pub fn must(mut self, query: impl Into<Clause>) -> Self {
        self.must.push(query.into());
        self
    }

    /// Add a should clause
    pub fn should(mut self, query: impl Into<Clause>) -> Self {
        self.should.push(query.into());
        self
    }

    /// Add a must_not clause
    pub fn must_not(mut self, query: impl Into<Clause>) -> Self {
        self.must_not.push(query.into());
        self
    }

    /// Add a filter clause
    pub fn filter(mut self, query: impl Into<Clause>) -> Self {
        self.filter.push(query.into());
        self
    }

    /// Set minimum should match
    pub fn with_minimum_should_match(mut self, msm: MinimumShouldMatch) -> Self {
        self.minimum_should_match = Some(msm);
        self
    }

    /// Set boost factor
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Check if this is an empty query
    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
            && self.should.is_empty()
            && self.must_not.is_empty()
            && self.filter.is_empty()
    }

    /// Get total number of clauses
    pub fn clause_count(&self) -> usize {
        self.must.len() + self.should.len() + self.must_not.len() + self.filter.len()
    }
}

fn render_clauses(body: &mut Map<String, Value>, key: &str, clauses: &[Clause]) {
    if !clauses.is_empty() {
        body.insert(
            key.to_string(),
            Value::Array(clauses.iter().map(Clause::to_dsl).collect()),
        );
    }
}

impl QueryNode for BoolQuery {
    fn query_type(&self) -> &'static str {
        "bool"
    }

    fn body(&self) -> Value {
        let mut body = Map::new();
        render_clauses(&mut body, "must", &self.must);
        render_clauses(&mut body, "should", &self.should);
        render_clauses(&mut body, "must_not", &self.must_not);
        render_clauses(&mut body, "filter", &self.filter);

        if let Some(ref msm) = self.minimum_should_match {
            body.insert(
                "minimum_should_match".to_string(),
                serde_json::to_value(msm).unwrap_or(Value::Null),
            );
        }
        insert_boost(&mut body, self.boost);
        Value::Object(body)
    }

    fn is_scoring(&self) -> bool {
        self.must.iter().chain(&self.should).any(Clause::is_scoring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::nodes::{MatchQuery, RangeQuery, TermQuery};
    use serde_json::json;

    #[test]
    fn test_bool_query_builder() {
        let query = BoolQuery::new()
            .must(MatchQuery::new("description", "data"))
            .should(TermQuery::new("tags", "api"))
            .must_not(TermQuery::new("status", "archived"))
            .filter(RangeQuery::new("date.created").gte("2017-01-01"));

        assert_eq!(query.must.len(), 1);
        assert_eq!(query.should.len(), 1);
        assert_eq!(query.must_not.len(), 1);
        assert_eq!(query.filter.len(), 1);
        assert_eq!(query.clause_count(), 4);
        assert!(!query.is_empty());
        assert!(query.is_scoring());
    }

    #[test]
    fn test_empty_bool_query() {
        let query = BoolQuery::new();
        assert!(query.is_empty());
        assert_eq!(query.clause_count(), 0);
        assert!(!query.is_scoring());
        assert_eq!(query.to_dsl(), json!({ "bool": {} }));
    }

    #[test]
    fn test_any_of_dsl() {
        let query = BoolQuery::any_of(vec![
            TermQuery::new("languages", "go").into(),
            TermQuery::new("languages", "rust").into(),
        ]);
        assert!(!query.is_scoring());
        assert_eq!(
            query.to_dsl(),
            json!({
                "bool": {
                    "should": [
                        { "term": { "languages": "go" } },
                        { "term": { "languages": "rust" } }
                    ],
                    "minimum_should_match": 1
                }
            })
        );
    }

    #[test]
    fn test_nested_bool_dsl() {
        let inner = BoolQuery::any_of(vec![TermQuery::new("tags", "api").into()]);
        let query = BoolQuery::new()
            .filter(TermQuery::new("status", "production"))
            .filter(inner)
            .with_boost(2.0);

        let dsl = query.to_dsl();
        assert_eq!(dsl["bool"]["filter"].as_array().unwrap().len(), 2);
        assert_eq!(
            dsl["bool"]["filter"][1]["bool"]["should"][0],
            json!({ "term": { "tags": "api" } })
        );
        assert_eq!(dsl["bool"]["boost"], json!(2.0));
        assert!(dsl["bool"].get("must").is_none());
    }
}
