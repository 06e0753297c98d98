//! Query DSL and compilers
//!
//! This module turns search parameters into search-engine request bodies:
//! - Boolean queries (must, should, filter, must_not)
//! - Term queries (exact match on keyword fields)
//! - Match, phrase, common-terms and multi-match queries (full-text search)
//! - Range queries (date bounds)
//! - Function score queries (frequency-weighted suggestions)
//!
//! # Example
//!
//! ```json
//! {
//!   "query": {
//!     "bool": {
//!       "must": [
//!         { "multi_match": { "query": "open data", "fields": ["name^5", "description^2"], "type": "best_fields" } }
//!       ],
//!       "filter": [
//!         { "range": { "date.created": { "gte": "2017-01-01" } } }
//!       ]
//!     }
//!   },
//!   "size": 10,
//!   "from": 0,
//!   "sort": [{ "_score": { "order": "desc" } }, { "score": { "order": "desc" } }]
//! }
//! ```

pub mod ast;
pub mod builder;
pub mod dates;
pub mod document;
pub mod nodes;
pub mod sort;
pub mod terms;
pub mod types;

pub use ast::{Clause, QueryNode};
pub use builder::{
    common_cutoff_clause, match_clause, phrase_match_clause, FullTextClause, FullTextStrategy,
    SearchQueryBuilder,
};
pub use document::{QueryBody, QueryDocument, SourceFilter, TermsQueryDocument};
pub use nodes::{
    BoolQuery, CommonTermsQuery, FunctionScoreQuery, MatchQuery, MultiMatchQuery, PhraseQuery,
    RangeQuery, ScoreFunction, TermQuery,
};
pub use sort::{SortField, SortSpec};
pub use terms::TermsQueryBuilder;
pub use types::*;
