//! Compiled query documents
//!
//! These are the request bodies sent to the search engine. Each serializes
//! (through serde or `to_json`) into the engine's native JSON DSL.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use super::ast::{Clause, QueryNode};
use super::nodes::FunctionScoreQuery;
use super::sort::SortField;

/// `_source` projection
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SourceFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

impl SourceFilter {
    /// Build a projection, dropping empty lists; `None` when nothing is restricted
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Option<Self> {
        let non_empty = |list: Vec<String>| (!list.is_empty()).then_some(list);
        let filter = Self {
            include: non_empty(include),
            exclude: non_empty(exclude),
        };
        (filter.include.is_some() || filter.exclude.is_some()).then_some(filter)
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(ref include) = self.include {
            map.insert("include".to_string(), Value::from(include.clone()));
        }
        if let Some(ref exclude) = self.exclude {
            map.insert("exclude".to_string(), Value::from(exclude.clone()));
        }
        Value::Object(map)
    }
}

/// Entity search request body
#[derive(Clone, Debug, PartialEq)]
pub struct QueryDocument {
    pub query: Clause,
    pub size: u64,
    pub from: u64,
    pub sort: Vec<SortField>,
    pub source: Option<SourceFilter>,
}

impl QueryDocument {
    /// Wrap one clause in a bare `{ "query": ... }` body
    ///
    /// Used for ad-hoc lookups, e.g. fetching a record by id with a `term`.
    pub fn single(clause: impl Into<Clause>) -> QueryBody {
        let body = QueryBody {
            query: clause.into(),
        };
        debug!(query_type = body.query.query_type(), "Built single-clause query");
        body
    }

    /// Render the document into the engine's JSON DSL
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("query".to_string(), self.query.to_dsl());
        map.insert("size".to_string(), Value::from(self.size));
        map.insert("from".to_string(), Value::from(self.from));
        map.insert(
            "sort".to_string(),
            Value::Array(self.sort.iter().map(SortField::to_dsl).collect()),
        );
        if let Some(ref source) = self.source {
            map.insert("_source".to_string(), source.to_json());
        }
        Value::Object(map)
    }
}

impl Serialize for QueryDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Body holding nothing but a query clause
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryBody {
    pub query: Clause,
}

impl QueryBody {
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("query".to_string(), self.query.to_dsl());
        Value::Object(map)
    }
}

/// Terms-suggestion request body
#[derive(Clone, Debug, PartialEq)]
pub struct TermsQueryDocument {
    pub query: FunctionScoreQuery,
    pub size: u64,
    pub from: u64,
}

impl TermsQueryDocument {
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("query".to_string(), self.query.to_dsl());
        map.insert("size".to_string(), Value::from(self.size));
        map.insert("from".to_string(), Value::from(self.from));
        Value::Object(map)
    }
}

impl Serialize for TermsQueryDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::nodes::TermQuery;
    use crate::query::types::SortOrder;
    use serde_json::json;

    #[test]
    fn test_source_filter_new() {
        assert_eq!(SourceFilter::new(Vec::new(), Vec::new()), None);

        let filter = SourceFilter::new(vec!["name".to_string()], Vec::new()).unwrap();
        assert_eq!(filter.include, Some(vec!["name".to_string()]));
        assert_eq!(filter.exclude, None);
        assert_eq!(filter.to_json(), json!({ "include": ["name"] }));
    }

    #[test]
    fn test_query_document_json() {
        let document = QueryDocument {
            query: Clause::MatchAll,
            size: 10,
            from: 20,
            sort: vec![SortField::score(), SortField::new("score", SortOrder::Desc)],
            source: None,
        };

        assert_eq!(
            document.to_json(),
            json!({
                "query": { "match_all": {} },
                "size": 10,
                "from": 20,
                "sort": [
                    { "_score": { "order": "desc" } },
                    { "score": { "order": "desc" } }
                ]
            })
        );
        assert_eq!(serde_json::to_value(&document).unwrap(), document.to_json());
    }

    #[test]
    fn test_query_document_with_source() {
        let document = QueryDocument {
            query: Clause::MatchAll,
            size: 1,
            from: 0,
            sort: Vec::new(),
            source: SourceFilter::new(Vec::new(), vec!["readme".to_string()]),
        };
        assert_eq!(document.to_json()["_source"], json!({ "exclude": ["readme"] }));
    }

    #[test]
    fn test_single_clause_body() {
        let body = QueryDocument::single(TermQuery::new("repoID", "gsa_open-data"));
        assert_eq!(
            body.to_json(),
            json!({ "query": { "term": { "repoID": "gsa_open-data" } } })
        );
        assert_eq!(serde_json::to_value(&body).unwrap(), body.to_json());
    }
}
