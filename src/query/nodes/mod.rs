//! Concrete query node implementations
//!
//! This module provides implementations of the `QueryNode` trait for
//! the clause kinds the compilers emit.

mod bool_query;
mod common_terms_query;
mod function_score;
mod match_query;
mod multi_match_query;
mod phrase_query;
mod range_query;
mod term_query;

pub use bool_query::BoolQuery;
pub use common_terms_query::{CommonTermsQuery, DEFAULT_CUTOFF_FREQUENCY};
pub use function_score::{FunctionScoreQuery, ScoreFunction};
pub use match_query::MatchQuery;
pub use multi_match_query::MultiMatchQuery;
pub use phrase_query::PhraseQuery;
pub use range_query::RangeQuery;
pub use term_query::TermQuery;
