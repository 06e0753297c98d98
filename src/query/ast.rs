//! Abstract Syntax Tree for query documents
//!
//! Every clause kind implements `QueryNode`, which renders it into the search
//! engine's JSON DSL. `Clause` is the closed set of kinds a compiled document can
//! hold; composite clauses (bool, function_score) own their children directly,
//! so any combination can be expressed without patching the rendered JSON.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt::Debug;

use super::nodes::{
    BoolQuery, CommonTermsQuery, FunctionScoreQuery, MatchQuery, MultiMatchQuery, PhraseQuery,
    RangeQuery, TermQuery,
};

/// Core trait for all query nodes
pub trait QueryNode: Debug {
    /// Get the query type name, which is also the DSL key of the clause
    fn query_type(&self) -> &'static str;

    /// Render the clause body (the value under the `query_type` key)
    fn body(&self) -> Value;

    /// Whether this query contributes to relevance scoring
    fn is_scoring(&self) -> bool {
        true
    }

    /// Render the full clause, e.g. `{ "term": { "status": "active" } }`
    fn to_dsl(&self) -> Value {
        keyed(self.query_type(), self.body())
    }
}

/// Build a single-key JSON object
pub(crate) fn keyed(key: &str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Insert `boost` into a clause body when one is set
pub(crate) fn insert_boost(body: &mut Map<String, Value>, boost: Option<f64>) {
    if let Some(boost) = boost {
        body.insert("boost".to_string(), Value::from(boost));
    }
}

/// One clause of a query document
#[derive(Clone, Debug, PartialEq)]
pub enum Clause {
    MatchAll,
    Term(TermQuery),
    Match(MatchQuery),
    MatchPhrase(PhraseQuery),
    Common(CommonTermsQuery),
    MultiMatch(MultiMatchQuery),
    Range(RangeQuery),
    Bool(BoolQuery),
    FunctionScore(FunctionScoreQuery),
}

impl Clause {
    fn node(&self) -> Option<&dyn QueryNode> {
        match self {
            Clause::MatchAll => None,
            Clause::Term(q) => Some(q),
            Clause::Match(q) => Some(q),
            Clause::MatchPhrase(q) => Some(q),
            Clause::Common(q) => Some(q),
            Clause::MultiMatch(q) => Some(q),
            Clause::Range(q) => Some(q),
            Clause::Bool(q) => Some(q),
            Clause::FunctionScore(q) => Some(q),
        }
    }

    /// Get the query type name for debugging and logging
    pub fn query_type(&self) -> &'static str {
        self.node().map_or("match_all", |node| node.query_type())
    }

    /// Whether this clause contributes to relevance scoring
    pub fn is_scoring(&self) -> bool {
        self.node().map_or(false, |node| node.is_scoring())
    }

    /// Render the clause into the engine's JSON DSL
    pub fn to_dsl(&self) -> Value {
        match self.node() {
            Some(node) => node.to_dsl(),
            None => keyed("match_all", Value::Object(Map::new())),
        }
    }
}

impl Serialize for Clause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_dsl().serialize(serializer)
    }
}

macro_rules! clause_from {
    ($($node:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$node> for Clause {
                fn from(query: $node) -> Self {
                    Clause::$variant(query)
                }
            }
        )*
    };
}

clause_from!(
    TermQuery => Term,
    MatchQuery => Match,
    PhraseQuery => MatchPhrase,
    CommonTermsQuery => Common,
    MultiMatchQuery => MultiMatch,
    RangeQuery => Range,
    BoolQuery => Bool,
    FunctionScoreQuery => FunctionScore,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_all_clause() {
        let clause = Clause::MatchAll;
        assert_eq!(clause.query_type(), "match_all");
        assert!(!clause.is_scoring());
        assert_eq!(clause.to_dsl(), json!({ "match_all": {} }));
    }

    #[test]
    fn test_serialize_delegates_to_dsl() {
        let clause = Clause::from(TermQuery::new("status", "active"));
        assert_eq!(
            serde_json::to_value(&clause).unwrap(),
            json!({ "term": { "status": "active" } })
        );
        assert_eq!(clause.query_type(), "term");
    }

    #[test]
    fn test_keyed() {
        assert_eq!(keyed("a", json!(1)), json!({ "a": 1 }));
    }
}
