pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod response;
pub mod schema;

pub use config::{EntitySearchSettings, PageLimits, SearchSettings, TermsSettings};
pub use error::{QueryError, Result};
pub use models::*;
pub use query::{QueryDocument, SearchQueryBuilder, TermsQueryBuilder, TermsQueryDocument};
pub use response::{omit_private_keys, parse_response, sanitize_hits, total_hits, ResponseSanitizer};
pub use schema::{FieldType, FieldTypeRegistry, IndexMapping};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
